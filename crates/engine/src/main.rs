//! Echoes of the Horizon engine - main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use horizon_engine::{api, config::EngineConfig, infrastructure::JsonFileStore, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "horizon_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Echoes of the Horizon engine");

    let config = EngineConfig::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let store = Arc::new(JsonFileStore::new(config.snapshot_path.clone()));
    let snapshot_interval = config.snapshot_interval;

    let app = Arc::new(App::new(config, store));

    match app.restore_snapshot().await {
        Ok(true) => {}
        Ok(false) => tracing::info!("No snapshot found, starting fresh"),
        Err(error) => {
            tracing::warn!(error = %error, "Snapshot unreadable, starting fresh");
        }
    }

    // Periodic snapshot writer. Advisory durability: a crash between ticks
    // loses only the unsaved delta.
    let snapshot_app = app.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(snapshot_interval);
        interval.tick().await; // the first tick fires immediately
        loop {
            interval.tick().await;
            match snapshot_app.save_snapshot().await {
                Ok(()) => tracing::debug!("Snapshot saved"),
                Err(error) => tracing::warn!(error = %error, "Snapshot save failed"),
            }
        }
    });

    let mut router = api::http::routes()
        .route("/ws", get(api::websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app);

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())?;

    let mut cors = CorsLayer::new().allow_methods([Method::GET, Method::POST]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        if origins.is_empty() {
            return None;
        }
        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
