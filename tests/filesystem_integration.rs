use glob::Pattern;
use orbpack::{FilesystemExplorer, FsElement, FsFile};
use std::fs;
use tempfile::TempDir;

fn create_resource_tree(temp_dir: &TempDir) {
    let base = temp_dir.path();

    fs::write(base.join("launcher.properties"), "server.url=${orbrunnerServerUrl}").unwrap();
    fs::write(base.join("app.css"), ".root {}").unwrap();

    fs::create_dir_all(base.join("update_logs")).unwrap();
    fs::write(base.join("update_logs").join("index.txt"), "v1.0.md\n").unwrap();
    fs::write(base.join("update_logs").join("v1.0.md"), "# v1.0").unwrap();

    fs::create_dir_all(base.join("models").join("rooms")).unwrap();
    fs::write(base.join("models").join("rooms").join("hall.obj"), "o hall").unwrap();
}

#[test]
fn test_integration_scan_is_sorted_and_relative() {
    let temp_dir = TempDir::new().unwrap();
    create_resource_tree(&temp_dir);

    let explorer = FilesystemExplorer::new(temp_dir.path());
    let root = explorer.scan_from_root().unwrap();
    assert!(root.is_root);

    let (file_count, dir_count) = explorer.count_elements(&root);
    assert_eq!(file_count, 5);
    assert_eq!(dir_count, 3); // update_logs, models, models/rooms

    let relative: Vec<_> = explorer
        .files(&root)
        .into_iter()
        .map(|file| file.relative.as_str())
        .collect();
    assert_eq!(
        relative,
        vec![
            "app.css",
            "launcher.properties",
            "models/rooms/hall.obj",
            "update_logs/index.txt",
            "update_logs/v1.0.md",
        ]
    );
}

#[test]
fn test_integration_find_files_matching() {
    let temp_dir = TempDir::new().unwrap();
    create_resource_tree(&temp_dir);

    let explorer = FilesystemExplorer::new(temp_dir.path());
    let root = explorer.scan_from_root().unwrap();

    let matching = |pattern: &str| -> Vec<String> {
        explorer
            .find_files_matching(&root, &Pattern::new(pattern).unwrap())
            .into_iter()
            .map(|file| file.relative.clone())
            .collect()
    };

    // patterns match the relative path and `*` does not cross directories
    assert!(matching("*.md").is_empty());
    assert_eq!(matching("update_logs/*.md"), vec!["update_logs/v1.0.md"]);
    assert_eq!(matching("**/*.md"), vec!["update_logs/v1.0.md"]);
    assert!(matching("hall.obj").is_empty());
    assert_eq!(matching("models/rooms/*"), vec!["models/rooms/hall.obj"]);
    assert_eq!(matching("launcher.properties"), vec!["launcher.properties"]);
}

#[test]
fn test_integration_file_metadata_and_hash() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello.txt");
    fs::write(&path, "hello").unwrap();

    let mut file = FsFile::new(path, "hello.txt".to_string());
    file.metadata_scan().unwrap();
    file.hash().unwrap();

    assert_eq!(file.size, Some(5));
    assert_eq!(
        file.sha256.as_deref(),
        Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
    );
}

#[test]
fn test_integration_error_handling() {
    let explorer = FilesystemExplorer::new("/definitely/does/not/exist");
    assert!(explorer.scan_from_root().is_err());

    // test with empty directory
    let temp_dir = TempDir::new().unwrap();
    let explorer = FilesystemExplorer::new(temp_dir.path());
    let result = explorer.scan_from_root().unwrap();

    let (file_count, dir_count) = explorer.count_elements(&result);
    assert_eq!(file_count, 0);
    assert_eq!(dir_count, 0);
    assert!(result.elements.is_empty());
    assert!(!result.elements.iter().any(|e| matches!(e, FsElement::File(_))));
}
