//! Station source error types.

use std::sync::Arc;

/// Errors that can occur when fetching station data.
///
/// `Clone` so that the outcome of one shared fetch can be handed, unchanged,
/// to every caller waiting on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Arc<reqwest::Error>),

    /// Authentication failed
    #[error("unauthorized: check STATION_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The source has no station with this name
    #[error("station not found: {station}")]
    NotFound { station: String },

    /// The fetch never produced a result (panicked or was cancelled)
    #[error("station fetch interrupted: {message}")]
    Interrupted { message: String },
}

impl From<reqwest::Error> for StationError {
    fn from(err: reqwest::Error) -> Self {
        StationError::Http(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = StationError::NotFound {
            station: "Embarcadero".into(),
        };
        assert_eq!(err.to_string(), "station not found: Embarcadero");

        let err = StationError::Interrupted {
            message: "source panicked".into(),
        };
        assert_eq!(err.to_string(), "station fetch interrupted: source panicked");
    }

    #[test]
    fn clones_compare_by_display() {
        let err = StationError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
