//! Read-only HTTP status surface plus the admin save hook.
//!
//! Operational tooling only: clients play the game over the WebSocket.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use horizon_domain::Region;

use crate::app::App;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(server_status))
        .route("/regions", get(regions))
        .route("/players", get(players))
        .route("/admin/save", post(admin_save))
}

/// Server status and basic information.
async fn server_status(State(app): State<Arc<App>>) -> Json<Value> {
    Json(json!({
        "server_name": "Echoes of the Horizon",
        "status": "online",
        "travelers_online": app.sessions.count().await,
        "regions_available": Region::ALL.len(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// The region table with live population counts.
async fn regions(State(app): State<Arc<App>>) -> Json<Value> {
    let populations = app.sessions.population_by_region().await;
    let regions: Vec<Value> = Region::ALL
        .iter()
        .map(|region| {
            let info = app.content.region(*region);
            json!({
                "key": region.key(),
                "name": info.name,
                "description": info.description,
                "terrain": info.terrain,
                "special_locations": info.special_locations,
                "players": populations.get(region).copied().unwrap_or(0),
            })
        })
        .collect();
    Json(json!({
        "regions": regions,
        "total_regions": regions.len(),
    }))
}

/// Currently online players.
async fn players(State(app): State<Arc<App>>) -> Json<Value> {
    let players: Vec<Value> = app
        .sessions
        .list_active()
        .await
        .into_iter()
        .map(|session| {
            json!({
                "id": session.player.as_str(),
                "name": session.name,
                "region": session.region.key(),
                "level": session.level,
                "last_update": session.last_update,
            })
        })
        .collect();
    Json(json!({
        "total_online": players.len(),
        "players": players,
    }))
}

/// Force a snapshot write. Failures report to the operator; the game keeps
/// running either way.
async fn admin_save(State(app): State<Arc<App>>) -> (StatusCode, Json<Value>) {
    match app.save_snapshot().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "saved", "timestamp": chrono::Utc::now() })),
        ),
        Err(error) => {
            tracing::warn!(error = %error, "Snapshot save failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "failed" })),
            )
        }
    }
}
