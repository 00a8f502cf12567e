//! HTTP station API client.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{Departure, Station};

use super::error::StationError;
use super::source::StationSource;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Wrapper for the stations response.
#[derive(Debug, Deserialize)]
struct StationsResponse {
    stations: Vec<Station>,
}

/// Wrapper for the departures response.
#[derive(Debug, Deserialize)]
struct DeparturesResponse {
    departures: Vec<Departure>,
}

/// Configuration for the station API client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// API key for x-apikey header authentication, if the API needs one
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a new config for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Authenticate with an API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for a remote station API.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StationClient {
    /// Create a new station API client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| StationError::Api {
            status: 0,
            message: format!("invalid base URL {:?}: {}", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StationError::Api {
                status: 0,
                message: format!("base URL {:?} cannot have paths", config.base_url),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let api_key_header =
                HeaderValue::from_str(api_key).map_err(|_| StationError::Api {
                    status: 0,
                    message: "Invalid API key format".to_string(),
                })?;
            headers.insert(HeaderName::from_static("x-apikey"), api_key_header);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The URL for a path below the base URL, one segment per element.
    ///
    /// Segments are percent-encoded, so station names with spaces or
    /// slashes are safe.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, StationError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl StationSource for StationClient {
    async fn fetch_all(&self) -> Result<Vec<Station>, StationError> {
        let response: StationsResponse = self.get_json(self.endpoint(&["stations"])).await?;
        Ok(response.stations)
    }

    async fn departures(&self, station: &Station) -> Result<Vec<Departure>, StationError> {
        let url = self.endpoint(&["stations", station.id(), "departures"]);
        match self.get_json::<DeparturesResponse>(url).await {
            Ok(response) => Ok(response.departures),
            Err(StationError::Api { status: 404, .. }) => Err(StationError::NotFound {
                station: station.name.clone(),
            }),
            Err(e) => Err(e),
        }
    }
}
