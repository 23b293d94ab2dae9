use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crawl_server::cache::{CacheConfig, CachedMapsClient};
use crawl_server::maps::{MapsClient, MapsConfig, MockMapsClient};
use crawl_server::planner::CrawlConfig;
use crawl_server::web::{AppState, MapsBackend, create_router};

/// Listen address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crawl_server=info,tower_http=info")),
        )
        .init();

    let maps = match std::env::var("CRAWL_MOCK_FIXTURE") {
        Ok(path) => {
            let mock = MockMapsClient::from_json_file(&path).expect("Failed to load mock fixture");
            info!(%path, venues = mock.venue_count(), "serving maps data from fixture");
            MapsBackend::Mock(mock)
        }
        Err(_) => MapsBackend::Live(live_client()),
    };

    let state = AppState::new(maps, CrawlConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be host:port");

    info!("Bar crawl planner listening on http://{addr}");
    info!("  GET  /health              - Health check");
    info!("  POST /api/generate-crawl  - Generate a crawl");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}

/// Cached client for the live maps service, configured from the environment.
fn live_client() -> CachedMapsClient {
    let api_key = std::env::var("GOOGLE_MAPS_API_KEY").unwrap_or_else(|_| {
        warn!("GOOGLE_MAPS_API_KEY not set. API calls will fail.");
        String::new()
    });

    let mut config = MapsConfig::new(api_key);
    if let Ok(url) = std::env::var("MAPS_BASE_URL") {
        config = config.with_base_url(url);
    }
    if let Ok(region) = std::env::var("MAPS_REGION") {
        config = config.with_region(region);
    }

    let client = MapsClient::new(config).expect("Failed to create maps client");
    CachedMapsClient::new(client, &CacheConfig::default())
}
