//! Error types and definitions for archscore
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`ArchScoreError`]. Errors carry a severity so the caller can decide whether a
//! failure aborts the run or is only reported.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for archscore operations
#[derive(Debug, Error)]
pub enum ArchScoreError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be read
    #[error("Cannot read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not a recognised script dialect
    #[error("Unsupported source type: {path}")]
    UnsupportedSourceType { path: PathBuf },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML parsing errors without file context
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSerialize {
        #[source]
        source: toml::ser::Error,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Analysis errors carrying a context message
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Metric computation errors
    #[error("Metric error in {metric}: {message}")]
    Metric { metric: String, message: String },

    /// Logging could not be initialised
    #[error("Logging setup error: {message}")]
    Logging { message: String },
}

impl ArchScoreError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            ArchScoreError::PermissionDenied { .. } => ErrorSeverity::Warning,
            ArchScoreError::JsonParse { .. } => ErrorSeverity::Warning,
            ArchScoreError::SourceRead { .. } => ErrorSeverity::Warning,
            ArchScoreError::UnsupportedSourceType { .. } => ErrorSeverity::Warning,
            ArchScoreError::Logging { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            ArchScoreError::Config { .. } => ErrorSeverity::Critical,
            ArchScoreError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ArchScoreError::ConfigRead { .. } => ErrorSeverity::Critical,
            ArchScoreError::ConfigParse { .. } => ErrorSeverity::Critical,
            ArchScoreError::InvalidPath { .. } => ErrorSeverity::Critical,
            ArchScoreError::OutputWrite { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ArchScoreError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            ArchScoreError::JsonParse { file, source } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            ArchScoreError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            ArchScoreError::SourceRead { path, source } => {
                format!("Cannot read '{}': {}. The file is skipped.", path.display(), source)
            }
            ArchScoreError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing project directory.", path.display())
            }
            ArchScoreError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create one with --init or use command line options.", path.display())
            }
            ArchScoreError::OutputWrite { path, source } => {
                format!("Cannot write report file '{}': {}. Check the output directory.", path.display(), source)
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        ArchScoreError::Io { source }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ArchScoreError::JsonParse { file: file.into(), source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ArchScoreError::Config { message: message.into() }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        ArchScoreError::PermissionDenied { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        ArchScoreError::InvalidPath { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ArchScoreError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an output write error
    pub fn output_write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArchScoreError::OutputWrite { path: path.into(), source }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        ArchScoreError::Analysis { message: message.into() }
    }

    /// Create a metric error
    pub fn metric_error(metric: impl Into<String>, message: impl Into<String>) -> Self {
        ArchScoreError::Metric {
            metric: metric.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ArchScoreError {
    fn from(err: std::io::Error) -> Self {
        ArchScoreError::io_error(err)
    }
}

impl From<toml::de::Error> for ArchScoreError {
    fn from(err: toml::de::Error) -> Self {
        ArchScoreError::TomlParse { source: err }
    }
}

impl From<toml::ser::Error> for ArchScoreError {
    fn from(err: toml::ser::Error) -> Self {
        ArchScoreError::TomlSerialize { source: err }
    }
}

impl From<glob::PatternError> for ArchScoreError {
    fn from(err: glob::PatternError) -> Self {
        ArchScoreError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for ArchScoreError {
    fn from(err: serde_json::Error) -> Self {
        ArchScoreError::JsonSerialize { source: err }
    }
}

impl From<walkdir::Error> for ArchScoreError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        if let Some(io_err) = err.io_error() {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                return ArchScoreError::permission_denied(path);
            }
        }
        ArchScoreError::directory_traversal_error(path, err.to_string())
    }
}

/// Result type alias for archscore operations
pub type Result<T> = std::result::Result<T, ArchScoreError>;
