//! Settings file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{ArchScoreError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML settings file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ArchScoreError::ConfigNotFound { path: path.to_path_buf() });
    }

    let content = fs::read_to_string(path).map_err(|e| ArchScoreError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML settings content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| ArchScoreError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(scan_path) = &settings.scan_path {
        if scan_path.as_os_str().is_empty() {
            return Err(ArchScoreError::config_error(format!(
                "Invalid empty scan_path in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(output_dir) = &settings.output_dir {
        if output_dir.as_os_str().is_empty() {
            return Err(ArchScoreError::config_error(format!(
                "Invalid empty output_dir in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(ArchScoreError::config_error(format!(
                    "Empty exclude pattern in config file: {}",
                    path.display()
                )));
            }

            glob::Pattern::new(pattern).map_err(|e| {
                ArchScoreError::config_error(format!(
                    "Invalid exclude pattern '{}' in config file: {}: {}",
                    pattern,
                    path.display(),
                    e
                ))
            })?;
        }
    }

    if let Some(extensions) = &settings.extensions {
        if extensions.iter().any(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(ArchScoreError::config_error(format!(
                "Empty extension in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(0) = settings.cache_capacity {
        return Err(ArchScoreError::config_error(format!(
            "Invalid cache_capacity 0 in config file: {}. Must be at least 1.",
            path.display()
        )));
    }

    Ok(())
}

/// Find and load settings from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    let current_dir_config = PathBuf::from(DEFAULT_CONFIG_FILE);
    if current_dir_config.exists() {
        return Ok(Some(parse_config_file(current_dir_config)?));
    }

    if let Some(home_dir) = dirs::home_dir() {
        let home_config = home_dir.join(DEFAULT_CONFIG_FILE);
        if home_config.exists() {
            return Ok(Some(parse_config_file(home_config)?));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("archscore").join("config.toml");
        if xdg_config.exists() {
            return Ok(Some(parse_config_file(xdg_config)?));
        }
    }

    Ok(None)
}

/// Create a default settings file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(ArchScoreError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(|e| ArchScoreError::output_write_error(path, e))?;

    Ok(())
}
