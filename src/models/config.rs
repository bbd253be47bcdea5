//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for archscore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory of the project to assess
    pub scan_path: PathBuf,

    /// Directory that receives the JSON structure and the markdown reports
    pub output_dir: PathBuf,

    /// Directory names or glob patterns skipped during discovery
    pub exclude_patterns: Vec<String>,

    /// File extensions treated as source files
    pub extensions: Vec<String>,

    /// Scoring variant of the method-name cohesion metric
    pub cohesion_mode: CohesionMode,

    /// Label used for the coupling metric
    pub coupling_variant: CouplingVariant,

    /// Weights of the maintainability sub-characteristics
    pub weights: Weights,

    /// Per-metric grade boundary overrides
    pub thresholds: Thresholds,

    /// Whether metrics share one parsed-file cache for the run
    pub cache_enabled: bool,

    /// Maximum number of parsed files held by the cache
    pub cache_capacity: usize,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in console output
    pub use_colors: bool,

    /// Whether to show progress spinners
    pub show_progress: bool,

    /// Debug log file, `None` disables file logging
    pub log_file: Option<PathBuf>,

    /// Optional architecture description (JSON)
    pub architecture_config: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            output_dir: PathBuf::from("result"),
            exclude_patterns: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "coverage".to_string(),
            ],
            extensions: ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            cohesion_mode: CohesionMode::default(),
            coupling_variant: CouplingVariant::default(),
            weights: Weights::default(),
            thresholds: Thresholds::default(),
            cache_enabled: false,
            cache_capacity: 512,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
            log_file: Some(PathBuf::from("logs/debug.log")),
            architecture_config: PathBuf::from("config.json"),
        }
    }
}

/// Scoring variant of the method-name cohesion metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CohesionMode {
    /// Names matching a sub-domain count as fully off-domain
    #[default]
    Strict,
    /// Names matching a sub-domain count half
    Lenient,
}

impl std::str::FromStr for CohesionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(CohesionMode::Strict),
            "lenient" => Ok(CohesionMode::Lenient),
            _ => Err(format!("Invalid cohesion mode: {}", s)),
        }
    }
}

impl std::fmt::Display for CohesionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CohesionMode::Strict => write!(f, "strict"),
            CohesionMode::Lenient => write!(f, "lenient"),
        }
    }
}

/// Label of the coupling metric
///
/// Both variants count the module's own outgoing relative imports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouplingVariant {
    #[default]
    Afferent,
    Efferent,
}

impl std::str::FromStr for CouplingVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "afferent" => Ok(CouplingVariant::Afferent),
            "efferent" => Ok(CouplingVariant::Efferent),
            _ => Err(format!("Invalid coupling variant: {}", s)),
        }
    }
}

impl std::fmt::Display for CouplingVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CouplingVariant::Afferent => write!(f, "afferent"),
            CouplingVariant::Efferent => write!(f, "efferent"),
        }
    }
}

/// Weights of the five maintainability sub-characteristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub analyzability: f64,
    pub modifiability: f64,
    pub testability: f64,
    pub modularity: f64,
    pub reusability: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            analyzability: 1.0,
            modifiability: 1.0,
            testability: 1.0,
            modularity: 1.0,
            reusability: 1.0,
        }
    }
}

/// Grade boundary overrides, four ascending limits per metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cyclomatic_complexity: Option<Vec<f64>>,
    pub callable_length: Option<Vec<f64>>,
    pub cohesion: Option<Vec<f64>>,
    pub coupling: Option<Vec<f64>>,
    pub propagation_cost: Option<Vec<f64>>,
}

impl Thresholds {
    /// Field-wise merge, values from `other` win
    pub fn merge_from(&mut self, other: Thresholds) {
        if other.cyclomatic_complexity.is_some() {
            self.cyclomatic_complexity = other.cyclomatic_complexity;
        }
        if other.callable_length.is_some() {
            self.callable_length = other.callable_length;
        }
        if other.cohesion.is_some() {
            self.cohesion = other.cohesion;
        }
        if other.coupling.is_some() {
            self.coupling = other.coupling;
        }
        if other.propagation_cost.is_some() {
            self.propagation_cost = other.propagation_cost;
        }
    }

    /// Iterate over the configured overrides with their setting names
    pub fn entries(&self) -> Vec<(&'static str, &Vec<f64>)> {
        [
            ("cyclomatic_complexity", &self.cyclomatic_complexity),
            ("callable_length", &self.callable_length),
            ("cohesion", &self.cohesion),
            ("coupling", &self.coupling),
            ("propagation_cost", &self.propagation_cost),
        ]
        .into_iter()
        .filter_map(|(name, limits)| limits.as_ref().map(|l| (name, l)))
        .collect()
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub exclude_patterns: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub cohesion_mode: Option<CohesionMode>,
    pub coupling_variant: Option<CouplingVariant>,
    pub weights: Option<Weights>,
    pub thresholds: Option<Thresholds>,
    pub cache_enabled: Option<bool>,
    pub cache_capacity: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub architecture_config: Option<PathBuf>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.scan_path.is_some() {
            self.scan_path = other.scan_path;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.extensions.is_some() {
            self.extensions = other.extensions;
        }
        if other.cohesion_mode.is_some() {
            self.cohesion_mode = other.cohesion_mode;
        }
        if other.coupling_variant.is_some() {
            self.coupling_variant = other.coupling_variant;
        }
        if other.weights.is_some() {
            self.weights = other.weights;
        }
        if let Some(thresholds) = other.thresholds {
            match &mut self.thresholds {
                Some(existing) => existing.merge_from(thresholds),
                None => self.thresholds = Some(thresholds),
            }
        }
        if other.cache_enabled.is_some() {
            self.cache_enabled = other.cache_enabled;
        }
        if other.cache_capacity.is_some() {
            self.cache_capacity = other.cache_capacity;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }
        if other.architecture_config.is_some() {
            self.architecture_config = other.architecture_config;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(scan_path) = &self.scan_path {
            settings.scan_path = scan_path.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(extensions) = &self.extensions {
            settings.extensions = extensions.clone();
        }
        if let Some(cohesion_mode) = self.cohesion_mode {
            settings.cohesion_mode = cohesion_mode;
        }
        if let Some(coupling_variant) = self.coupling_variant {
            settings.coupling_variant = coupling_variant;
        }
        if let Some(weights) = &self.weights {
            settings.weights = weights.clone();
        }
        if let Some(thresholds) = &self.thresholds {
            settings.thresholds = thresholds.clone();
        }
        if let Some(cache_enabled) = self.cache_enabled {
            settings.cache_enabled = cache_enabled;
        }
        if let Some(cache_capacity) = self.cache_capacity {
            settings.cache_capacity = cache_capacity;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = if log_file.as_os_str().is_empty() {
                None
            } else {
                Some(log_file.clone())
            };
        }
        if let Some(architecture_config) = &self.architecture_config {
            settings.architecture_config = architecture_config.clone();
        }

        settings
    }
}
