//! Discovered project structure

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Mapping from package directory to its package entry
pub type ProjectStructure = BTreeMap<PathBuf, Package>;

/// A directory-level grouping of modules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Directory base name
    pub name: String,
    /// Module file path to module name
    pub modules: BTreeMap<PathBuf, String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: BTreeMap::new(),
        }
    }
}

/// Project structure plus the derived module universe
///
/// This is the shape of `project-structure.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructureReport {
    /// Every module path, in package order then module order
    pub flat_module_map: Vec<PathBuf>,
    pub structure: ProjectStructure,
}

impl ProjectStructureReport {
    /// Build the report, deriving the flat module list from the structure
    pub fn from_structure(structure: ProjectStructure) -> Self {
        let flat_module_map = structure
            .values()
            .flat_map(|package| package.modules.keys().cloned())
            .collect();
        Self {
            flat_module_map,
            structure,
        }
    }

    pub fn module_count(&self) -> usize {
        self.flat_module_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat_module_map.is_empty()
    }

    /// Whether `path` belongs to the analysed universe
    pub fn contains(&self, path: &Path) -> bool {
        self.structure
            .values()
            .any(|package| package.modules.contains_key(path))
    }

    /// Module name of `path`, if it is a module
    pub fn module_name(&self, path: &Path) -> Option<&str> {
        self.structure
            .values()
            .find_map(|package| package.modules.get(path).map(String::as_str))
    }

    /// Iterate over `(module path, module name)` in universe order
    pub fn modules(&self) -> impl Iterator<Item = (&PathBuf, &String)> {
        self.structure.values().flat_map(|package| package.modules.iter())
    }
}
