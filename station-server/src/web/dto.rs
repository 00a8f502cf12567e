//! Data transfer objects for the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Departure, Station};

/// One station in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub platforms: Vec<String>,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id().to_string(),
            name: station.name.clone(),
            platforms: station.platforms.clone(),
        }
    }
}

/// Response for the station list endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

impl StationsResponse {
    /// Build a response from a station list.
    pub fn from_stations(stations: &[Station]) -> Self {
        Self {
            stations: stations.iter().map(StationResult::from).collect(),
        }
    }
}

/// One departure in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureResult {
    pub line: String,
    pub platform: String,
    pub etd: DateTime<Utc>,
    /// Whole minutes until departure at the time of the response.
    pub minutes: i64,
}

impl DepartureResult {
    /// Build a result, counting minutes from `now`.
    pub fn from_departure(departure: &Departure, now: DateTime<Utc>) -> Self {
        Self {
            line: departure.line.clone(),
            platform: departure.platform.clone(),
            etd: departure.etd,
            minutes: departure.minutes_from(now),
        }
    }
}

/// Response for the departures endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeparturesResponse {
    pub station: StationResult,
    pub departures: Vec<DepartureResult>,
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn station_result_uses_id() {
        let station = Station::new("Powell", ["1", "2"]);
        let result = StationResult::from(&station);
        assert_eq!(result.id, "Powell");
        assert_eq!(result.platforms, vec!["1", "2"]);
    }

    #[test]
    fn departure_result_counts_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let departure = Departure::new("Red", "1", now + chrono::Duration::minutes(7));
        let result = DepartureResult::from_departure(&departure, now);
        assert_eq!(result.minutes, 7);
        assert_eq!(result.line, "Red");
    }
}
