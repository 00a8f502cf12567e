//! The data source seam.

use async_trait::async_trait;

use crate::domain::{Departure, Station};

use super::error::StationError;

/// Something that can fetch station data, typically over the network.
///
/// Every call is a single independent attempt: no retries, no caching, no
/// memory of earlier calls. Two calls may return different results.
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Fetch the full list of stations.
    async fn fetch_all(&self) -> Result<Vec<Station>, StationError>;

    /// Fetch upcoming departures for one station.
    ///
    /// Returns [`StationError::NotFound`] if the source doesn't know the
    /// station.
    async fn departures(&self, station: &Station) -> Result<Vec<Departure>, StationError>;
}
