//! Settings validation

use crate::error::{ArchScoreError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.is_dir() {
            return Err(ArchScoreError::invalid_path(&settings.scan_path));
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.extensions.is_empty() {
            return Err(ArchScoreError::config_error("At least one source extension is required"));
        }

        if settings.cache_capacity == 0 {
            return Err(ArchScoreError::config_error("Cache capacity must be at least 1"));
        }

        Self::validate_weights(settings)?;
        Self::validate_thresholds(settings)?;

        Ok(())
    }

    fn validate_weights(settings: &Settings) -> Result<()> {
        let w = &settings.weights;
        let weights = [
            ("analyzability", w.analyzability),
            ("modifiability", w.modifiability),
            ("testability", w.testability),
            ("modularity", w.modularity),
            ("reusability", w.reusability),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ArchScoreError::config_error(format!(
                    "Weight of {} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if weights.iter().all(|(_, weight)| *weight == 0.0) {
            return Err(ArchScoreError::config_error("At least one weight must be positive"));
        }

        Ok(())
    }

    fn validate_thresholds(settings: &Settings) -> Result<()> {
        for (name, limits) in settings.thresholds.entries() {
            if limits.len() != 4 {
                return Err(ArchScoreError::config_error(format!(
                    "Thresholds for {} need exactly 4 limits, got {}",
                    name,
                    limits.len()
                )));
            }
            if limits.iter().any(|limit| !limit.is_finite()) {
                return Err(ArchScoreError::config_error(format!(
                    "Thresholds for {} must be finite numbers",
                    name
                )));
            }
            if limits.windows(2).any(|pair| pair[0] > pair[1]) {
                return Err(ArchScoreError::config_error(format!(
                    "Thresholds for {} must be ascending",
                    name
                )));
            }
        }

        Ok(())
    }
}
