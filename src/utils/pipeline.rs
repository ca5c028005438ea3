// linear build pipeline: version, resources, package

use super::changelog::{ResolvedVersion, resolve_source};
use super::config::{ProjectConfig, UnitConfig};
use super::packager::{PackageReport, PackageSource, PackageSpec, package};
use super::resources::{BuildProperties, ResourceReport, process_resources};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// outcome of building one unit
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub unit: String,
    pub version: ResolvedVersion,
    pub resources: ResourceReport,
    pub package: PackageReport,
    pub built_at: DateTime<Utc>,
}

/// runs build units against one project root and one set of resolved properties
pub struct BuildPipeline {
    root: PathBuf,
    config: ProjectConfig,
    properties: BuildProperties,
}

impl BuildPipeline {
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig, properties: BuildProperties) -> Self {
        Self {
            root: root.into(),
            config,
            properties,
        }
    }

    /// resolve the project's declared properties against external overrides
    pub fn with_overrides(
        root: impl Into<PathBuf>,
        config: ProjectConfig,
        overrides: &BTreeMap<String, String>,
    ) -> Self {
        let properties = BuildProperties::resolve(&config.properties, overrides);
        Self::new(root, config, properties)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn properties(&self) -> &BuildProperties {
        &self.properties
    }

    pub fn unit(&self, name: &str) -> Result<&UnitConfig> {
        self.config
            .find_unit(name)
            .ok_or_else(|| Error::configuration(format!("unknown build unit '{}'", name)))
    }

    /// the named unit, or the first one declared
    pub fn unit_or_default(&self, name: Option<&str>) -> Result<&UnitConfig> {
        match name {
            Some(name) => self.unit(name),
            None => self
                .config
                .units
                .first()
                .ok_or_else(|| Error::configuration("no build units declared")),
        }
    }

    pub fn resolve_version(&self, unit: &UnitConfig) -> Result<ResolvedVersion> {
        resolve_source(&self.root, &unit.version)
    }

    pub fn artifact_path(&self, unit: &UnitConfig, version: &ResolvedVersion) -> PathBuf {
        self.root
            .join(&unit.output_dir)
            .join(unit.artifact_name(version.as_str()))
    }

    pub fn run_unit(&self, unit: &UnitConfig) -> Result<BuildReport> {
        log::info!("building unit '{}'", unit.name);

        let version = self.resolve_version(unit)?;

        let staging = TempDir::new().map_err(|e| Error::FileWriteError {
            path: std::env::temp_dir(),
            source: e,
        })?;
        let resources_dir = unit.resources.as_ref().map(|dir| self.root.join(dir));
        let resources = process_resources(
            resources_dir.as_deref(),
            staging.path(),
            &unit.filters,
            &self.properties,
        )?;

        let mut spec = PackageSpec::new(self.artifact_path(unit, &version), &unit.main_class)
            .title(&unit.name)
            .version(version.as_str());
        for dir in &unit.classes {
            spec = spec.source(PackageSource::Directory(self.root.join(dir)));
        }
        if !resources.staged.is_empty() {
            spec = spec.source(PackageSource::Directory(staging.path().to_path_buf()));
        }
        for dependency in &unit.dependencies {
            spec = spec.source(PackageSource::from_path(self.root.join(dependency)));
        }

        let package = package(&spec)?;

        Ok(BuildReport {
            unit: unit.name.clone(),
            version,
            resources,
            package,
            built_at: Utc::now(),
        })
    }

    /// build every unit in declaration order, stopping at the first failure
    pub fn run_all(&self) -> Result<Vec<BuildReport>> {
        self.config
            .units
            .iter()
            .map(|unit| self.run_unit(unit))
            .collect()
    }

    pub fn run_named(&self, name: &str) -> Result<BuildReport> {
        self.run_unit(self.unit(name)?)
    }
}
