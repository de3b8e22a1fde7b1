use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use aed_router::cache::{CacheConfig, RouteCache};
use aed_router::domain::FacilitySnapshot;
use aed_router::navigator::Navigator;
use aed_router::routes::{RoutesClient, RoutesConfig};
use aed_router::web::{AppState, create_router};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Get credentials from environment
    let api_key = env::var("ROUTES_API_KEY").unwrap_or_else(|_| {
        warn!("ROUTES_API_KEY not set, provider calls will fail");
        String::new()
    });

    let mut routes_config = RoutesConfig::new(api_key);
    if let Ok(base_url) = env::var("ROUTES_BASE_URL") {
        routes_config = routes_config.with_base_url(base_url);
    }
    let client = RoutesClient::new(routes_config)?;

    let cache = Arc::new(RouteCache::new(&CacheConfig::default()));
    let navigator = Navigator::new(client, cache);

    let facilities = match env::var("AED_ROUTER_FACILITIES") {
        Ok(path) => {
            let snapshot = FacilitySnapshot::load(&path)?;
            let active = snapshot.active_facilities();
            info!(
                path = %path,
                records = snapshot.len(),
                active = active.len(),
                "loaded facility snapshot"
            );
            active
        }
        Err(_) => {
            info!("AED_ROUTER_FACILITIES not set, requests must supply candidates");
            Vec::new()
        }
    };

    let app = create_router(AppState::new(navigator, facilities));

    let addr: SocketAddr = env::var("AED_ROUTER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    info!(%addr, "AED router listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
