//! Departure types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single upcoming departure from a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Line name (e.g. "Red").
    pub line: String,
    /// Platform the train leaves from.
    pub platform: String,
    /// Estimated time of departure.
    pub etd: DateTime<Utc>,
}

impl Departure {
    /// Create a departure.
    pub fn new(line: impl Into<String>, platform: impl Into<String>, etd: DateTime<Utc>) -> Self {
        Self {
            line: line.into(),
            platform: platform.into(),
            etd,
        }
    }

    /// Minutes from `now` until this departure, rounded down.
    ///
    /// Negative once the departure time has passed.
    pub fn minutes_from(&self, now: DateTime<Utc>) -> i64 {
        (self.etd - now).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn minutes_from_now() {
        let dep = Departure::new("Red", "1", noon() + Duration::seconds(300));
        assert_eq!(dep.minutes_from(noon()), 5);
    }

    #[test]
    fn minutes_from_rounds_down() {
        let dep = Departure::new("Red", "1", noon() + Duration::seconds(359));
        assert_eq!(dep.minutes_from(noon()), 5);
    }

    #[test]
    fn past_departure_is_negative() {
        let dep = Departure::new("Blue", "2", noon() - Duration::minutes(3));
        assert_eq!(dep.minutes_from(noon()), -3);
    }

    #[test]
    fn serializes_etd_as_rfc3339() {
        let dep = Departure::new("Yellow", "2", noon());
        let json = serde_json::to_string(&dep).unwrap();
        assert_eq!(
            json,
            r#"{"line":"Yellow","platform":"2","etd":"2024-03-15T12:00:00Z"}"#
        );
    }
}
