//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, CohesionModeArg, CouplingArg};
use crate::error::Result;
use crate::models::config::{CohesionMode, CouplingVariant, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments relevant to settings
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub cohesion_mode: Option<CohesionMode>,
    pub coupling_variant: Option<CouplingVariant>,
    pub arch_config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub cache: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        let cli_args = CliArgs {
            path: args.path.clone(),
            output_dir: args.output_dir.clone(),
            exclude: if args.exclude.is_empty() { None } else { Some(args.exclude.clone()) },
            cohesion_mode: args.cohesion_mode.map(|mode| match mode {
                CohesionModeArg::Strict => CohesionMode::Strict,
                CohesionModeArg::Lenient => CohesionMode::Lenient,
            }),
            coupling_variant: args.coupling.map(|variant| match variant {
                CouplingArg::Afferent => CouplingVariant::Afferent,
                CouplingArg::Efferent => CouplingVariant::Efferent,
            }),
            arch_config: args.arch_config.clone(),
            log_file: args.log_file.clone(),
            cache: args.cache,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        };

        Self::new(cli_args)
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }

    /// Hand the collected arguments to [`load_config`](super::load_config)
    pub fn into_args(self) -> CliArgs {
        self.args
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            scan_path: self.args.path.clone(),
            output_dir: self.args.output_dir.clone(),
            exclude_patterns: self.args.exclude.clone(),
            cohesion_mode: self.args.cohesion_mode,
            coupling_variant: self.args.coupling_variant,
            architecture_config: self.args.arch_config.clone(),
            log_file: self.args.log_file.clone(),
            ..Default::default()
        };

        // Flags only override when set
        if self.args.cache {
            settings.cache_enabled = Some(true);
        }
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
