//! Cached, coalescing access to the station list.
//!
//! The [`StationRepository`] sits between a [`StationSource`] and any number
//! of concurrent callers:
//!
//! - The last successfully fetched list is kept in memory and served without
//!   touching the source.
//! - Concurrent requests that need a fetch share one in-flight source call
//!   instead of each issuing their own.
//! - [`refresh`](StationRepository::refresh) re-fetches, but falls back to the
//!   cached list if the fetch fails.
//!
//! The in-flight fetch runs in its own task. It outlives any caller that
//! stops waiting for it, and it clears itself from the repository state
//! before any waiter sees its result, so a caller arriving after settlement
//! always starts fresh work.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Stations;
use crate::stations::{StationError, StationSource};

/// Outcome of one fetch, as seen by every caller that waited on it.
type FetchResult = Result<Stations, StationError>;

/// A fetch in progress that any number of callers can await.
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Everything the repository knows, guarded by one lock.
#[derive(Default)]
struct CacheState {
    /// Last successful fetch result. Never overwritten by a failure.
    cached: Option<Stations>,
    /// The fetch currently running, if any. At most one at a time.
    in_flight: Option<SharedFetch>,
}

/// Station list with caching and request coalescing.
///
/// Construct one per source and share it (e.g. behind an `Arc`); all
/// callers of the same repository share its cache and in-flight fetch.
pub struct StationRepository {
    source: Arc<dyn StationSource>,
    state: Arc<Mutex<CacheState>>,
}

impl StationRepository {
    /// Create a repository with an empty cache.
    pub fn new(source: Arc<dyn StationSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Get the station list, fetching it only if nothing is cached yet.
    ///
    /// Once any fetch has succeeded this never calls the source and never
    /// fails. Before that, errors from the fetch are returned unchanged.
    pub async fn stations(&self) -> Result<Stations, StationError> {
        let fetch = {
            let mut state = self.state.lock().await;
            if let Some(cached) = &state.cached {
                debug!(count = cached.len(), "station cache hit");
                return Ok(Arc::clone(cached));
            }
            self.join_or_start(&mut state)
        };
        fetch.await
    }

    /// Re-fetch the station list, falling back to the cached list on failure.
    ///
    /// Joins a fetch that is already running rather than starting a second
    /// one. A failed fetch is only reported when there is no cached list to
    /// return instead; otherwise the error is dropped silently.
    pub async fn refresh(&self) -> Result<Stations, StationError> {
        let fetch = {
            let mut state = self.state.lock().await;
            self.join_or_start(&mut state)
        };

        match fetch.await {
            Ok(stations) => Ok(stations),
            Err(err) => {
                let state = self.state.lock().await;
                state.cached.clone().ok_or(err)
            }
        }
    }

    /// Whether a fetch is currently running.
    #[cfg(test)]
    pub(crate) async fn is_fetching(&self) -> bool {
        self.state.lock().await.in_flight.is_some()
    }

    /// The cached list, without ever fetching.
    #[cfg(test)]
    pub(crate) async fn cached(&self) -> Option<Stations> {
        self.state.lock().await.cached.clone()
    }

    /// Return the running fetch, or start one.
    ///
    /// Must be called with the state lock held, so that checking for and
    /// installing `in_flight` is atomic.
    fn join_or_start(&self, state: &mut CacheState) -> SharedFetch {
        if let Some(fetch) = &state.in_flight {
            debug!("joining in-flight station fetch");
            return fetch.clone();
        }

        debug!("starting station fetch");
        let source = Arc::clone(&self.source);
        let shared_state = Arc::clone(&self.state);

        // The task can't take the lock until our caller releases it, so
        // `in_flight` is always installed before the task can clear it.
        let task = tokio::spawn(async move {
            let result = match AssertUnwindSafe(source.fetch_all()).catch_unwind().await {
                Ok(result) => result.map(Stations::from),
                Err(_) => Err(StationError::Interrupted {
                    message: "station source panicked".to_string(),
                }),
            };

            let mut state = shared_state.lock().await;
            state.in_flight = None;
            if let Ok(stations) = &result {
                debug!(count = stations.len(), "station fetch succeeded");
                state.cached = Some(Arc::clone(stations));
            }
            result
        });

        let fetch = async move {
            task.await.unwrap_or_else(|e| {
                Err(StationError::Interrupted {
                    message: e.to_string(),
                })
            })
        }
        .boxed()
        .shared();

        state.in_flight = Some(fetch.clone());
        fetch
    }
}
