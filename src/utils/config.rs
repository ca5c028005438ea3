use super::changelog::VersionSource;
use super::filesystem::is_single_component;
use super::resources::{FilterRule, PropertyConfig};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// name of the project file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "orbpack.toml";

fn default_output_dir() -> PathBuf {
    PathBuf::from("build/libs")
}

/// one independently packaged program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConfig {
    pub name: String,

    /// binary name of the class started by the artifact
    pub main_class: String,

    pub version: VersionSource,

    /// compiled output directories, added first
    #[serde(default)]
    pub classes: Vec<PathBuf>,

    /// resource directory, processed then added after the classes
    #[serde(default)]
    pub resources: Option<PathBuf>,

    /// resource files that get placeholder expansion
    #[serde(default)]
    pub filters: Vec<FilterRule>,

    /// runtime classpath in order, archives or directories
    #[serde(default)]
    pub dependencies: Vec<PathBuf>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl UnitConfig {
    pub fn new(
        name: impl Into<String>,
        main_class: impl Into<String>,
        version: VersionSource,
    ) -> Self {
        Self {
            name: name.into(),
            main_class: main_class.into(),
            version,
            classes: Vec::new(),
            resources: None,
            filters: Vec::new(),
            dependencies: Vec::new(),
            output_dir: default_output_dir(),
        }
    }

    pub fn classes(mut self, dir: impl Into<PathBuf>) -> Self {
        self.classes.push(dir.into());
        self
    }

    pub fn resources(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources = Some(dir.into());
        self
    }

    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filters.push(FilterRule::new(pattern));
        self
    }

    pub fn dependency(mut self, path: impl Into<PathBuf>) -> Self {
        self.dependencies.push(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// artifact file name for a resolved version
    pub fn artifact_name(&self, version: &str) -> String {
        format!("{}-{}.jar", self.name, version)
    }
}

/// main configuration for orbpack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// build units, packaged in declaration order
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitConfig>,

    /// build properties available to resource templates
    #[serde(default = "default_properties", rename = "property")]
    pub properties: Vec<PropertyConfig>,
}

fn default_properties() -> Vec<PropertyConfig> {
    vec![PropertyConfig::server_url()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            properties: default_properties(),
        }
    }
}

impl ProjectConfig {
    pub fn unit(mut self, unit: UnitConfig) -> Self {
        self.units.push(unit);
        self
    }

    /// parse and validate configuration text; `path` is only used for errors
    pub fn parse_str(path: &Path, contents: &str) -> Result<Self> {
        let config: ProjectConfig =
            toml::from_str(contents).map_err(|e| Error::TomlParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_str(path, &contents)
    }

    /// find configuration file in a project root
    pub fn find_config_file<P: AsRef<Path>>(project_root: P) -> Option<PathBuf> {
        let config_path = project_root.as_ref().join(CONFIG_FILE_NAME);

        if config_path.exists() && config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.units.is_empty() {
            return Err(Error::configuration("no build units declared"));
        }

        let mut names = HashSet::new();
        for unit in &self.units {
            if unit.name.trim().is_empty() {
                return Err(Error::configuration("build unit with an empty name"));
            }
            if !is_single_component(&unit.name) {
                return Err(Error::configuration(format!(
                    "build unit name '{}' must not contain '/', '\\' or '..'",
                    unit.name
                )));
            }
            if !names.insert(unit.name.as_str()) {
                return Err(Error::configuration(format!(
                    "duplicate build unit '{}'",
                    unit.name
                )));
            }
            if unit.main_class.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "build unit '{}' has an empty main_class",
                    unit.name
                )));
            }
        }

        let mut properties = HashSet::new();
        for property in &self.properties {
            if !properties.insert(property.name.as_str()) {
                return Err(Error::configuration(format!(
                    "duplicate property '{}'",
                    property.name
                )));
            }
        }

        Ok(())
    }

    pub fn find_unit(&self, name: &str) -> Option<&UnitConfig> {
        self.units.iter().find(|unit| unit.name == name)
    }
}
