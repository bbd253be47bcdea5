//! AST parser wrapper using OXC

use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::declarations::DeclarationCollector;
use crate::error::{ArchScoreError, Result};
use crate::models::source::{ImportStatement, SourceAnalysis};
use crate::utils::PathResolver;

/// Parses script files and extracts a [`SourceAnalysis`] per file
pub struct ASTParser {
    parse_options: ParseOptions,
    resolver: PathResolver,
}

impl ASTParser {
    /// Create a parser resolving imports against `extensions`
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            parse_options: ParseOptions {
                parse_regular_expression: true,
                ..ParseOptions::default()
            },
            resolver: PathResolver::new(extensions),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Parse a file and extract its callables and imports
    ///
    /// The AST only lives inside this call; everything returned is owned.
    pub fn parse_and_analyze(&self, path: &Path) -> Result<SourceAnalysis> {
        let source_text = fs::read_to_string(path).map_err(|e| ArchScoreError::SourceRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.analyze_source(path, &source_text)
    }

    /// Analyse `source_text` as if it were the content of `path`
    pub fn analyze_source(&self, path: &Path, source_text: &str) -> Result<SourceAnalysis> {
        let source_type = SourceType::from_path(path).map_err(|_| ArchScoreError::UnsupportedSourceType {
            path: path.to_path_buf(),
        })?;

        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source_text, source_type)
            .with_options(self.parse_options.clone())
            .parse();

        if ret.panicked {
            warn!(
                "parser gave up on {} ({} diagnostics), treating it as empty",
                path.display(),
                ret.errors.len()
            );
            return Ok(SourceAnalysis::empty(path));
        }

        let parse_errors: Vec<String> = ret.errors.iter().map(diagnostic_text).collect();
        if !parse_errors.is_empty() {
            debug!("{} parsed with {} recoverable errors", path.display(), parse_errors.len());
        }

        let declarations = DeclarationCollector::collect(&ret.program, source_text);

        let imports = declarations
            .import_specifiers
            .into_iter()
            .map(|specifier| {
                let resolved = self.resolver.resolve(&specifier, path);
                ImportStatement { specifier, resolved }
            })
            .collect();

        Ok(SourceAnalysis {
            path: path.to_path_buf(),
            callables: declarations.callables,
            imports,
            parse_errors,
        })
    }
}

/// One-line text of a parser diagnostic
fn diagnostic_text(diagnostic: &OxcDiagnostic) -> String {
    diagnostic.to_string()
}
