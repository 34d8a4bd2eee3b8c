//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::FullRepository;
use crate::models::{Clock, SystemClock};
use crate::services::PacingCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Pacing results shared across requests
    pub cache: PacingCache,
    /// Source of "now" when a request does not pin it
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state with the given repository, the wall
    /// clock and a default pacing cache.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            cache: PacingCache::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Application state with the pacing cache sized from `config`.
    pub fn from_config(repository: Arc<dyn FullRepository>, config: &AppConfig) -> Self {
        Self::new(repository).with_cache(PacingCache::new(config.pacing.cache_ttl_secs))
    }

    pub fn with_cache(mut self, cache: PacingCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
