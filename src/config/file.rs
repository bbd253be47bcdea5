//! Settings file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{ArchScoreError, Result};
use crate::models::config::PartialSettings;

/// Default settings file name
pub const DEFAULT_CONFIG_FILE: &str = ".archscore.toml";

/// Settings file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(ArchScoreError::ConfigNotFound { path: self.path.clone() });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

/// Suffixes of the recognised environment variables
const ENV_KEYS: [&str; 7] = [
    "SCAN_PATH",
    "OUTPUT_DIR",
    "EXCLUDE",
    "COHESION_MODE",
    "COUPLING",
    "CACHE",
    "LOG_FILE",
];

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = self.var("SCAN_PATH") {
            settings.scan_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = self.var("OUTPUT_DIR") {
            settings.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(exclude) = self.var("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        if let Some(mode) = self.var("COHESION_MODE") {
            settings.cohesion_mode = Some(mode.parse().map_err(ArchScoreError::config_error)?);
        }

        if let Some(variant) = self.var("COUPLING") {
            settings.coupling_variant = Some(variant.parse().map_err(ArchScoreError::config_error)?);
        }

        if let Some(cache) = self.var("CACHE") {
            settings.cache_enabled = Some(matches!(cache.to_lowercase().as_str(), "1" | "true" | "yes"));
        }

        if let Some(log_file) = self.var("LOG_FILE") {
            settings.log_file = Some(PathBuf::from(log_file));
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
