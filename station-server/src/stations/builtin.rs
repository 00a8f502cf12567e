//! Built-in station source for running without a remote API.
//!
//! Serves a small, fixed slice of the BART network. Departure times are
//! computed relative to the moment of the call, so the board always looks
//! live.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::{Departure, Station};

use super::error::StationError;
use super::source::StationSource;

/// A station and its scheduled departures as (line, platform, seconds from now).
type BoardSpec = (&'static str, &'static [&'static str], &'static [(&'static str, &'static str, i64)]);

/// Some of the BART stations with shorter names.
const NETWORK: &[BoardSpec] = &[
    (
        "Colma",
        &["1", "2"],
        &[
            ("Red", "1", 300),
            ("Red", "2", 600),
            ("Yellow", "1", 900),
            ("Yellow", "2", 1200),
        ],
    ),
    (
        "Powell",
        &["1", "2"],
        &[
            ("Red", "1", 60),
            ("Red", "2", 120),
            ("Yellow", "1", 240),
            ("Yellow", "2", 840),
            ("Blue", "1", 600),
            ("Blue", "2", 780),
            ("Green", "1", 900),
            ("Green", "2", 540),
        ],
    ),
    (
        "MacArthur",
        &["1", "2", "3", "4"],
        &[
            ("Red", "1", 180),
            ("Red", "3", 600),
            ("Yellow", "2", 480),
            ("Yellow", "4", 1200),
            ("Orange", "1", 300),
            ("Orange", "3", 900),
        ],
    ),
    (
        "12th Street",
        &["1", "2", "3"],
        &[
            ("Red", "1", 180),
            ("Red", "3", 600),
            ("Yellow", "2", 480),
            ("Yellow", "3", 1200),
            ("Orange", "1", 60),
            ("Orange", "3", 420),
        ],
    ),
    (
        "Ashby",
        &["1", "2"],
        &[
            ("Red", "1", 180),
            ("Red", "3", 600),
            ("Orange", "1", 120),
            ("Orange", "3", 360),
        ],
    ),
];

/// Station source backed by a fixed in-memory network.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStationSource;

impl BuiltinStationSource {
    /// Create the built-in source.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StationSource for BuiltinStationSource {
    async fn fetch_all(&self) -> Result<Vec<Station>, StationError> {
        Ok(NETWORK
            .iter()
            .map(|(name, platforms, _)| Station::new(*name, platforms.iter().copied()))
            .collect())
    }

    async fn departures(&self, station: &Station) -> Result<Vec<Departure>, StationError> {
        // Lookup is by the full station value, platforms included.
        let (_, _, board) = NETWORK
            .iter()
            .find(|(name, platforms, _)| *name == station.name && *platforms == station.platforms)
            .ok_or_else(|| StationError::NotFound {
                station: station.name.clone(),
            })?;

        let now = Utc::now();
        Ok(board
            .iter()
            .map(|(line, platform, secs)| Departure::new(*line, *platform, now + Duration::seconds(*secs)))
            .collect())
    }
}
