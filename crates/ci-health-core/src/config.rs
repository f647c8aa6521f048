//! Maintainer directory, loaded from the dashboard's YAML config.

use crate::errors::HealthError;
use crate::model::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub maintainers: MaintainerDirectory,
}

/// Maintainer id (e.g. `"@alice"`) to profile. Read-only for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintainerDirectory(pub BTreeMap<String, Maintainer>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Maintainer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Slack workspace name to member id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slack: BTreeMap<String, String>,
}

impl MaintainerDirectory {
    pub fn get(&self, id: &str) -> Option<&Maintainer> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, id: impl Into<String>, maintainer: Maintainer) {
        self.0.insert(id.into(), maintainer);
    }
}

pub fn parse_config(raw: &str, path: &Path) -> Result<DashboardConfig, HealthError> {
    // An empty document is valid YAML `null`; treat it as "no maintainers".
    if raw.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }
    serde_yaml::from_str(raw).map_err(|e| HealthError::config_parse(path, e))
}

pub fn load_config(path: &Path) -> Result<DashboardConfig, HealthError> {
    let raw = std::fs::read_to_string(path).map_err(|e| HealthError::config_read(path, e))?;
    let cfg = parse_config(&raw, path)?;
    tracing::debug!(
        path = %path.display(),
        maintainers = cfg.maintainers.len(),
        "loaded maintainer directory"
    );
    Ok(cfg)
}
