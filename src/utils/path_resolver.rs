//! Import specifier resolution
//!
//! Only relative specifiers are resolved. Package imports and path aliases
//! lie outside the analysed universe and resolve to nothing.

use std::path::{Component, Path, PathBuf};

/// Script extensions that may stand in for a TypeScript source in ESM-style imports
const TS_SUBSTITUTES: [(&str, &[&str]); 4] = [
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Resolves relative import specifiers to files on disk
#[derive(Debug, Clone)]
pub struct PathResolver {
    extensions: Vec<String>,
}

impl PathResolver {
    /// Create a resolver trying `extensions` in order
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `path` carries one of the recognised extensions
    pub fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|known| known == ext))
            .unwrap_or(false)
    }

    /// Resolve `specifier` as imported from the file `from`
    pub fn resolve(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        if specifier.starts_with('.') || specifier.starts_with('/') {
            self.resolve_relative(specifier, from)
        } else {
            None
        }
    }

    fn resolve_relative(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        let base = from.parent().unwrap_or(from);
        let candidate = normalize_path(&base.join(specifier));

        // Check exact path first
        if candidate.is_file() {
            return Some(candidate);
        }

        if let Some(found) = self.resolve_substitute(&candidate) {
            return Some(found);
        }

        // Try adding extensions
        let candidate_str = candidate.to_string_lossy();
        for ext in &self.extensions {
            let with_ext = PathBuf::from(format!("{}.{}", candidate_str, ext));
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }

        // Directory import
        if candidate.is_dir() {
            for ext in &self.extensions {
                let index = candidate.join(format!("index.{}", ext));
                if index.is_file() {
                    return Some(index);
                }
            }
        }

        None
    }

    /// `./user.js` written in TypeScript sources usually means `./user.ts`
    fn resolve_substitute(&self, candidate: &Path) -> Option<PathBuf> {
        let ext = candidate.extension()?.to_str()?;
        let (_, substitutes) = TS_SUBSTITUTES.iter().find(|(from, _)| *from == ext)?;
        substitutes
            .iter()
            .filter(|sub| self.extensions.iter().any(|known| known.as_str() == **sub))
            .map(|sub| candidate.with_extension(sub))
            .find(|path| path.is_file())
    }
}

/// Lexically remove `.` and `..` components
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
