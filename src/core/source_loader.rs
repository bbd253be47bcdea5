//! Parsed-file supply for discovery and metrics
//!
//! By default every request parses the file again, so each metric works on
//! its own parsed set. With a cache the first parse of a path is shared for
//! the rest of the run; results are identical either way.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use crate::error::{handle_error, Result};
use crate::models::config::Settings;
use crate::models::source::SourceAnalysis;
use crate::parsers::ASTParser;
use crate::utils::PathResolver;

pub struct SourceLoader {
    parser: ASTParser,
    cache: Option<LruCache<std::path::PathBuf, Arc<SourceAnalysis>>>,
    parses: usize,
}

impl SourceLoader {
    /// Loader without cache
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            parser: ASTParser::new(extensions),
            cache: None,
            parses: 0,
        }
    }

    /// Loader sharing up to `capacity` parsed files
    pub fn with_cache<S: AsRef<str>>(extensions: &[S], capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Some(LruCache::new(capacity)),
            ..Self::new(extensions)
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        if settings.cache_enabled {
            Self::with_cache(&settings.extensions, settings.cache_capacity)
        } else {
            Self::new(&settings.extensions)
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        self.parser.resolver()
    }

    /// Number of actual parses performed so far
    pub fn parse_count(&self) -> usize {
        self.parses
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Parse `path`, or return the cached analysis
    pub fn load(&mut self, path: &Path) -> Result<Arc<SourceAnalysis>> {
        if let Some(cache) = self.cache.as_mut() {
            if let Some(hit) = cache.get(path) {
                return Ok(Arc::clone(hit));
            }
        }

        let analysis = Arc::new(self.parser.parse_and_analyze(path)?);
        self.parses += 1;

        if let Some(cache) = self.cache.as_mut() {
            cache.put(path.to_path_buf(), Arc::clone(&analysis));
        }

        Ok(analysis)
    }

    /// Like [`load`](Self::load), but an unreadable file counts as empty
    pub fn load_or_empty(&mut self, path: &Path) -> Arc<SourceAnalysis> {
        match self.load(path) {
            Ok(analysis) => analysis,
            Err(err) => {
                handle_error(err);
                Arc::new(SourceAnalysis::empty(path))
            }
        }
    }
}
