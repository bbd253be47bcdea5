//! Configuration management

pub mod architecture;
pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;

use tracing::debug;

use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};

pub use architecture::{load_architecture_config, ArchitectureConfig, Layer, LayeredArchitecture, StructureConfig};
pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Prefix of the environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "ARCHSCORE";

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10
    }
}

/// Configuration builder for merging multiple sources
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if source.is_available() {
            debug!("loading settings from {}", source.name());
            Ok(self.merge(source.load()?))
        } else {
            Ok(self)
        }
    }

    /// Merge the first settings file found in the default locations
    ///
    /// A default file that exists but does not parse is an error.
    pub fn add_default_config_file(self) -> Result<Self> {
        match parser::find_default_config()? {
            Some(default_config) => {
                debug!("loading settings from the default settings file");
                Ok(self.merge(default_config))
            }
            None => Ok(self),
        }
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        settings::SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from all sources with proper precedence handling
///
/// Defaults < settings file < environment < command line.
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env_prefix(cli_args, ENV_PREFIX)
}

/// Load configuration with a custom environment variable prefix
pub fn load_config_with_env_prefix(cli_args: CliArgs, env_prefix: &str) -> Result<Settings> {
    let mut builder = ConfigBuilder::new();

    builder = match &cli_args.config {
        Some(path) => builder.merge(FileConfig::with_path(path).load()?),
        None => builder.add_default_config_file()?,
    };

    builder = builder.load_from(&EnvConfig::new(env_prefix))?;
    builder = builder.load_from(&CliConfig::new(cli_args))?;

    builder.build()
}
