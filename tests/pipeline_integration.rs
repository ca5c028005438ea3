use orbpack::utils::testing::{TestArchive, TestProject, TestProjectBuilder};
use orbpack::{
    BuildPipeline, DEFAULT_SERVER_URL, Error, ProjectConfig, SERVER_URL_PROPERTY,
    verify_entry_point,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const PROJECT: &str = r#"
[[unit]]
name = "game"
main_class = "ohio.pugnetgames.chad.GameApp"
classes = ["build/classes"]
resources = "src/main/resources"
dependencies = ["libs/mp3spi.jar"]

[unit.version]
changelog = "src/main/resources/update_logs/index.txt"

[[unit]]
name = "launcher"
main_class = "ohio.pugnetgames.chad.launcher.Main"
version = { fixed = "1.0.0" }
classes = ["launcher/build/classes"]
resources = "launcher/src/main/resources"
filters = [{ pattern = "launcher.properties" }]
dependencies = ["libs/gson.jar"]
output_dir = "launcher/build/libs"
"#;

fn game_project() -> TestProjectBuilder {
    TestProjectBuilder::new()
        .config(PROJECT)
        .changelog(
            "src/main/resources/update_logs/index.txt",
            &["# update logs, newest last", "", "v1.3.md", "v1.4.md", ""],
        )
        .file("src/main/resources/update_logs/v1.4.md", "# v1.4\n* new rooms\n")
        .class("build/classes", "ohio.pugnetgames.chad.GameApp")
        .archive(TestArchive::new("libs/mp3spi.jar").class("javazoom.spi.mpeg.sampled.file.MpegAudioFileReader"))
        .class("launcher/build/classes", "ohio.pugnetgames.chad.launcher.Main")
        .file(
            "launcher/src/main/resources/launcher.properties",
            "server.url=${orbrunnerServerUrl}\n",
        )
        .archive(TestArchive::new("libs/gson.jar").class("com.google.gson.Gson"))
}

fn pipeline(project: &TestProject, overrides: &[(&str, &str)]) -> BuildPipeline {
    let config = ProjectConfig::load_from_file(project.join("orbpack.toml")).unwrap();
    let overrides: BTreeMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BuildPipeline::with_overrides(project.path(), config, &overrides)
}

fn read_entry(artifact: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(artifact).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}

#[test]
fn test_build_all_units() {
    let project = game_project().build().unwrap();
    let pipeline = pipeline(&project, &[]);

    let reports = pipeline.run_all().unwrap();
    assert_eq!(reports.len(), 2);

    let game = &reports[0];
    assert_eq!(game.unit, "game");
    assert_eq!(game.version.version, "v1.4");
    assert_eq!(game.package.artifact, project.join("build/libs/game-v1.4.jar"));
    assert!(game.package.entry_point_found);
    assert!(game.resources.expanded.is_empty());
    assert_eq!(
        read_entry(&game.package.artifact, "update_logs/v1.4.md"),
        "# v1.4\n* new rooms\n"
    );

    let launcher = &reports[1];
    assert_eq!(launcher.version.version, "1.0.0");
    assert_eq!(
        launcher.package.artifact,
        project.join("launcher/build/libs/launcher-1.0.0.jar")
    );
    assert_eq!(launcher.resources.expanded, vec!["launcher.properties"]);
    assert_eq!(
        read_entry(&launcher.package.artifact, "launcher.properties"),
        format!("server.url={}\n", DEFAULT_SERVER_URL)
    );

    for report in &reports {
        verify_entry_point(&report.package.artifact).unwrap();
    }
}

#[test]
fn test_server_url_override() {
    let project = game_project().build().unwrap();
    let pipeline = pipeline(&project, &[(SERVER_URL_PROPERTY, "http://example.com:9000")]);

    let report = pipeline.run_named("launcher").unwrap();
    assert_eq!(
        read_entry(&report.package.artifact, "launcher.properties"),
        "server.url=http://example.com:9000\n"
    );
}

#[test]
fn test_blank_server_url_uses_default() {
    let project = game_project().build().unwrap();
    let pipeline = pipeline(&project, &[(SERVER_URL_PROPERTY, "   ")]);

    assert_eq!(
        pipeline.properties().get(SERVER_URL_PROPERTY),
        Some(DEFAULT_SERVER_URL)
    );
    let report = pipeline.run_named("launcher").unwrap();
    assert_eq!(
        read_entry(&report.package.artifact, "launcher.properties"),
        "server.url=http://localhost:5000\n"
    );
}

#[test]
fn test_missing_template_aborts_launcher_build() {
    let project = game_project()
        .file("launcher/src/main/resources/launcher.properties.bak", "x")
        .build()
        .unwrap();
    std::fs::remove_file(project.join("launcher/src/main/resources/launcher.properties")).unwrap();

    let pipeline = pipeline(&project, &[]);
    let result = pipeline.run_named("launcher");
    assert!(matches!(result, Err(Error::ResourceNotFound { .. })));
    assert!(!project.join("launcher/build/libs/launcher-1.0.0.jar").exists());
}

#[test]
fn test_comment_only_changelog_aborts_game_build() {
    let project = game_project()
        .changelog(
            "src/main/resources/update_logs/index.txt",
            &["# nothing released yet", "", "#v0.1.md"],
        )
        .build()
        .unwrap();

    let pipeline = pipeline(&project, &[]);
    let unit = pipeline.unit("game").unwrap();
    assert!(matches!(
        pipeline.resolve_version(unit),
        Err(Error::Configuration { .. })
    ));
    assert!(pipeline.run_all().is_err());
}

#[test]
fn test_path_like_changelog_entry_is_rejected() {
    let project = game_project()
        .changelog(
            "src/main/resources/update_logs/index.txt",
            &["v1.4.md", "../../../escaped.md"],
        )
        .build()
        .unwrap();

    let pipeline = pipeline(&project, &[]);
    let result = pipeline.run_named("game");
    assert!(matches!(result, Err(Error::Format { line: 2, .. })));
    assert!(!project.join("build/escaped.jar").exists());
    assert!(!project.join("build/libs").exists());
}

#[test]
fn test_unknown_unit() {
    let project = game_project().build().unwrap();
    let pipeline = pipeline(&project, &[]);

    assert!(matches!(
        pipeline.run_named("server"),
        Err(Error::Configuration { .. })
    ));
    assert_eq!(pipeline.unit_or_default(None).unwrap().name, "game");
}

#[test]
fn test_substituted_value_is_not_expanded_again() {
    let project = game_project().build().unwrap();
    let pipeline = pipeline(&project, &[(SERVER_URL_PROPERTY, "${orbrunnerServerUrl}")]);

    let report = pipeline.run_named("launcher").unwrap();
    assert_eq!(
        read_entry(&report.package.artifact, "launcher.properties"),
        "server.url=${orbrunnerServerUrl}\n"
    );
}
