//! Read-only status query over the socket.

use horizon_domain::{Region, SessionId};
use horizon_shared::{RegionPopulationData, ServerMessage};

use crate::app::App;

/// Handle a `status_query`: unicast the active session count and
/// per-region population back to the asking session.
pub async fn handle_status_query(app: &App, session_id: SessionId) {
    let players_online = app.sessions.count().await;
    let populations = app.sessions.population_by_region().await;
    let regions = Region::ALL
        .iter()
        .map(|region| RegionPopulationData {
            region: *region,
            name: app.content.region(*region).name.clone(),
            players: populations.get(region).copied().unwrap_or(0),
        })
        .collect();

    app.sessions
        .send_to(
            session_id,
            ServerMessage::Status {
                players_online,
                regions,
            },
        )
        .await;
}
