// build property resolution

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// property holding the server URL the launcher talks to
pub const SERVER_URL_PROPERTY: &str = "orbrunnerServerUrl";

/// fallback server URL when none is supplied at build time
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// a declared build property and its fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConfig {
    pub name: String,
    pub default: String,
}

impl PropertyConfig {
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
        }
    }

    /// the server URL property with its localhost default
    pub fn server_url() -> Self {
        Self::new(SERVER_URL_PROPERTY, DEFAULT_SERVER_URL)
    }
}

/// pick the external value unless it is absent or whitespace only
pub fn resolve_property(external: Option<&str>, default: &str) -> String {
    match external {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// immutable set of resolved properties, computed once per build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildProperties {
    values: BTreeMap<String, String>,
}

impl BuildProperties {
    /// resolve every declared property against the external overrides
    pub fn resolve(definitions: &[PropertyConfig], overrides: &BTreeMap<String, String>) -> Self {
        for name in overrides.keys() {
            if !definitions.iter().any(|def| &def.name == name) {
                log::warn!("ignoring override for undeclared property '{}'", name);
            }
        }

        let values = definitions
            .iter()
            .map(|def| {
                let external = overrides.get(&def.name).map(String::as_str);
                let value = resolve_property(external, &def.default);
                if external.is_some_and(|v| v.trim().is_empty()) {
                    log::info!("property '{}' supplied blank, using default", def.name);
                }
                (def.name.clone(), value)
            })
            .collect();

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// parse a `name=value` override as given on the command line
pub fn parse_override(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid property override '{}', expected name=value", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid property override '{}', empty name", raw));
    }
    Ok((name.to_string(), value.to_string()))
}
