//! Project discovery and parsed-file supply

pub mod discovery;
pub mod source_loader;

pub use discovery::{
    discover_project, read_structure_report, write_structure_report, DiscoveryOutcome, ModuleDiscovery,
    STRUCTURE_FILE,
};
pub use source_loader::SourceLoader;
