use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, prelude::*};

use station_server::config::{ServerConfig, SourceConfig};
use station_server::repository::StationRepository;
use station_server::stations::{
    BuiltinStationSource, StationClient, StationClientConfig, StationSource,
};
use station_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    let source: Arc<dyn StationSource> = match &config.source {
        SourceConfig::Builtin => {
            info!("STATION_API_URL not set, serving built-in station data");
            Arc::new(BuiltinStationSource::new())
        }
        SourceConfig::Remote { base_url, api_key } => {
            let mut client_config = StationClientConfig::new(base_url);
            if let Some(api_key) = api_key {
                client_config = client_config.with_api_key(api_key);
            }
            info!(%base_url, "using remote station API");
            Arc::new(StationClient::new(client_config).expect("Failed to create station client"))
        }
    };

    let state = AppState::new(source);

    // Warm the cache; requests will retry the fetch if this fails
    match state.repository.stations().await {
        Ok(stations) => info!(count = stations.len(), "loaded stations"),
        Err(e) => error!(error = %e, "failed to load stations"),
    }

    if let Some(period) = config.refresh_interval {
        tokio::spawn(refresh_periodically(Arc::clone(&state.repository), period));
    }

    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Station server listening on http://{addr}");
    info!("  GET  /health");
    info!("  GET  /api/stations");
    info!("  POST /api/stations/refresh");
    info!("  GET  /api/stations/:name/departures");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

/// Refresh the station list every `period`.
async fn refresh_periodically(repository: Arc<StationRepository>, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // First tick is immediate, skip it
    loop {
        interval.tick().await;
        match repository.refresh().await {
            Ok(stations) => info!(count = stations.len(), "refreshed stations"),
            Err(e) => error!(error = %e, "failed to refresh stations"),
        }
    }
}
