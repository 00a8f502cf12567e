//! Application state for the web layer.

use std::sync::Arc;

use crate::repository::StationRepository;
use crate::stations::StationSource;

/// Shared application state.
///
/// Builds the repository on top of the source, so both handlers and
/// background tasks see the same cache.
#[derive(Clone)]
pub struct AppState {
    /// Station data source, used directly for uncached lookups
    pub source: Arc<dyn StationSource>,

    /// Cached, coalescing station list
    pub repository: Arc<StationRepository>,
}

impl AppState {
    /// Create a new app state around `source`.
    pub fn new(source: Arc<dyn StationSource>) -> Self {
        let repository = Arc::new(StationRepository::new(Arc::clone(&source)));
        Self { source, repository }
    }
}
