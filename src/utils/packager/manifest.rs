// jar manifest rendering and parsing

/// path of the manifest inside an archive
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// longest manifest line in bytes, excluding the line break
const MAX_LINE_BYTES: usize = 72;

/// main attributes of an archive manifest, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    pub fn new(main_class: impl Into<String>) -> Self {
        Self {
            attributes: vec![
                ("Manifest-Version".to_string(), "1.0".to_string()),
                ("Main-Class".to_string(), main_class.into()),
            ],
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn main_class(&self) -> Option<&str> {
        self.get("Main-Class")
    }

    /// render with CRLF line endings and a terminating blank line
    ///
    /// lines longer than 72 bytes continue on the next line after a single space
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.attributes {
            push_wrapped(&mut out, &format!("{}: {}", name, value));
        }
        out.push_str("\r\n");
        out
    }

    /// parse the main section; continuation lines start with a single space
    pub fn parse(text: &str) -> Self {
        let mut attributes: Vec<(String, String)> = Vec::new();

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break; // end of main section
            }

            if let Some(continued) = line.strip_prefix(' ') {
                if let Some((_, value)) = attributes.last_mut() {
                    value.push_str(continued);
                }
                continue;
            }

            if let Some((name, value)) = line.split_once(':') {
                attributes.push((name.trim().to_string(), value.trim_start().to_string()));
            }
        }

        Self { attributes }
    }
}

// splits only on char boundaries so multi-byte values stay valid utf-8
fn push_wrapped(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE_BYTES;

    while rest.len() > limit {
        let mut split = limit;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        out.push_str(&rest[..split]);
        out.push_str("\r\n ");
        rest = &rest[split..];
        limit = MAX_LINE_BYTES - 1; // the leading space counts
    }

    out.push_str(rest);
    out.push_str("\r\n");
}

/// archive path of the class file for a binary class name
pub fn class_entry_path(class_name: &str) -> String {
    format!("{}.class", class_name.replace('.', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_manifest() {
        let manifest = Manifest::new("ohio.pugnetgames.chad.GameApp")
            .attribute("Implementation-Version", "v1.4");
        assert_eq!(
            manifest.render(),
            "Manifest-Version: 1.0\r\nMain-Class: ohio.pugnetgames.chad.GameApp\r\nImplementation-Version: v1.4\r\n\r\n"
        );
    }

    #[test]
    fn test_parse_manifest_with_continuation() {
        let text = "Manifest-Version: 1.0\r\nMain-Class: ohio.pugnetgames.chad.laun\r\n cher.Main\r\n\r\nName: other\r\nMain-Class: ignored\r\n";
        let manifest = Manifest::parse(text);
        assert_eq!(manifest.main_class(), Some("ohio.pugnetgames.chad.launcher.Main"));
        assert_eq!(manifest.get("manifest-version"), Some("1.0"));
    }

    #[test]
    fn test_render_wraps_long_lines() {
        let version = format!("v1.4-{}", "nightly".repeat(20));
        let main_class = format!("ohio.pugnetgames.{}.GameApp", "ü".repeat(40));
        let manifest = Manifest::new(main_class.as_str()).attribute("Implementation-Version", &version);
        let rendered = manifest.render();

        let lines: Vec<&str> = rendered.split("\r\n").collect();
        assert!(lines.len() > 5);
        for line in &lines {
            assert!(line.len() <= 72, "line of {} bytes: {:?}", line.len(), line);
        }
        assert!(lines.iter().any(|line| line.starts_with(' ')));

        let parsed = Manifest::parse(&rendered);
        assert_eq!(parsed.main_class(), Some(main_class.as_str()));
        assert_eq!(parsed.get("Implementation-Version"), Some(version.as_str()));
    }

    #[test]
    fn test_render_line_of_exactly_72_bytes_is_not_wrapped() {
        let value = "x".repeat(72 - "Main-Class: ".len());
        let rendered = Manifest::new(value.as_str()).render();
        assert!(rendered.contains(&format!("Main-Class: {}\r\n\r\n", value)));
    }

    #[test]
    fn test_class_entry_path() {
        assert_eq!(
            class_entry_path("ohio.pugnetgames.chad.GameApp"),
            "ohio/pugnetgames/chad/GameApp.class"
        );
        assert_eq!(class_entry_path("Main"), "Main.class");
    }
}
