//! Lifetime-free facts extracted from one parsed source file

use std::path::PathBuf;

/// A named top-level function declaration with a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableUnit {
    pub name: String,
    /// Decision points plus one
    pub cyclomatic_complexity: u32,
    /// Body lines left after removing comments and blank lines
    pub logical_lines: usize,
}

/// One `import ... from '<specifier>'` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub specifier: String,
    /// Target file for relative specifiers that resolve on disk
    pub resolved: Option<PathBuf>,
}

impl ImportStatement {
    /// Intra-project import, i.e. the specifier starts with `.` or `/`
    pub fn is_relative(&self) -> bool {
        self.specifier.starts_with('.') || self.specifier.starts_with('/')
    }
}

/// Everything the metrics need to know about one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAnalysis {
    pub path: PathBuf,
    pub callables: Vec<CallableUnit>,
    pub imports: Vec<ImportStatement>,
    /// Recoverable parser diagnostics
    pub parse_errors: Vec<String>,
}

impl SourceAnalysis {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// A file is a module when it declares at least one callable
    pub fn is_module(&self) -> bool {
        !self.callables.is_empty()
    }

    /// Resolved targets of relative imports, in declaration order
    pub fn relative_targets(&self) -> impl Iterator<Item = &PathBuf> {
        self.imports
            .iter()
            .filter(|import| import.is_relative())
            .filter_map(|import| import.resolved.as_ref())
    }
}
