//! Optional architecture description
//!
//! The description is read from a JSON file (default `config.json` in the
//! working directory). A missing or malformed file never aborts a run: a
//! warning is logged and the description is treated as absent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ArchScoreError, Result};

/// Declared architecture of the assessed project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureConfig {
    pub structure: Option<StructureConfig>,
    pub layered_architecture: Option<LayeredArchitecture>,
}

/// Well-known project areas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureConfig {
    pub backend_path: Option<PathBuf>,
    pub frontend_path: Option<PathBuf>,
    pub tests_path: Option<PathBuf>,
}

/// Layer rules of a layered architecture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayeredArchitecture {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// One architectural layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub path: Vec<PathBuf>,
    #[serde(default)]
    pub can_only_depend_on_layers: Vec<String>,
}

impl ArchitectureConfig {
    /// Number of declared layers
    pub fn layer_count(&self) -> usize {
        self.layered_architecture
            .as_ref()
            .map(|arch| arch.layers.len())
            .unwrap_or(0)
    }
}

/// Read and parse an architecture description
pub fn read_architecture_config(path: &Path) -> Result<ArchitectureConfig> {
    let content = fs::read_to_string(path).map_err(|e| ArchScoreError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ArchScoreError::json_parse_error(path, e))
}

/// Load the architecture description, treating failures as absence
pub fn load_architecture_config(path: &Path) -> Option<ArchitectureConfig> {
    match read_architecture_config(path) {
        Ok(config) => {
            debug!(
                "architecture description {} declares {} layer(s)",
                path.display(),
                config.layer_count()
            );
            Some(config)
        }
        Err(err) => {
            warn!("architecture description unavailable: {}", err);
            None
        }
    }
}
