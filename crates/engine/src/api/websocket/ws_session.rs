//! Session lifecycle and movement: connect, move, chat, disconnect.

use chrono::Utc;
use tokio::sync::mpsc;

use horizon_domain::{
    GameEvent, PlayerId, Position, Region, Rotation, SessionEvent, SessionId,
};
use horizon_shared::{ChatEntryData, NpcData, QuestData, ServerMessage};

use crate::app::App;

use super::{apply_quest_reports, grant_experience};

/// Handle the initial `connect` message. Returns the new session id, or
/// `None` if registration was refused (dead channel, capacity).
pub async fn handle_connect(
    app: &App,
    tx: mpsc::Sender<ServerMessage>,
    player_id: String,
    player_name: String,
) -> Option<SessionId> {
    let player = PlayerId::new(player_id);
    let profile = app
        .profiles
        .checkout(&player, &player_name, app.config.spawn_position, Utc::now());
    let position = profile.last_position;
    let region = app.content.region_map.classify(position);

    let event = match app
        .sessions
        .register(player.clone(), profile, position, region, tx)
        .await
    {
        Ok(event) => event,
        Err(error) => {
            // resource error: reported to the operator, the client just
            // never hears back and retries
            tracing::warn!(player = %player, error = %error, "Registration refused");
            return None;
        }
    };
    let SessionEvent::PlayerJoined(snapshot) = event else {
        return None;
    };
    let session_id = snapshot.id;

    tracing::info!(session_id = %session_id, player = %player, region = %region, "Player joined");

    // welcome payload for the new arrival
    let region_info = app.content.region(region);
    app.sessions
        .send_to(
            session_id,
            ServerMessage::Welcome {
                player_id: player.to_string(),
                message: format!(
                    "Namaste! Welcome to {}, {}",
                    region_info.name, snapshot.name
                ),
                position: snapshot.position.into(),
                region: region_info.to_data(),
                level: snapshot.level,
                experience: snapshot.experience,
                regions_visited: app
                    .sessions
                    .profile(session_id)
                    .await
                    .map(|profile| profile.regions_visited.into_iter().collect())
                    .unwrap_or_default(),
            },
        )
        .await;

    // tell everyone else, then catch the newcomer up on the roster
    app.sessions
        .broadcast_to_others(
            session_id,
            ServerMessage::PlayerJoined {
                player: (&snapshot).into(),
            },
        )
        .await;
    for other in app.sessions.list_active().await {
        if other.id != session_id {
            app.sessions
                .send_to(
                    session_id,
                    ServerMessage::PlayerJoined {
                        player: (&other).into(),
                    },
                )
                .await;
        }
    }

    send_region_briefing(app, session_id, &player, region).await;

    let history = app.chat.recent().await;
    if !history.is_empty() {
        app.sessions
            .send_to(session_id, ServerMessage::ChatHistory { messages: history })
            .await;
    }

    Some(session_id)
}

/// Handle a `move` message: reclassify the region, detect transitions,
/// scan for pickups, and fan the movement out to everyone else.
pub async fn handle_move(app: &App, session_id: SessionId, position: Position, rotation: Rotation) {
    let region = app.content.region_map.classify(position);
    let Some(update) = app
        .sessions
        .update_position(session_id, position, rotation, region)
        .await
    else {
        // concurrent disconnect; expected no-op
        return;
    };
    let snapshot = update.snapshot;

    if update.previous_region != region {
        let first_visit = app.sessions.record_visit(session_id, region).await;
        let experience_gained = if first_visit {
            app.config.exploration_xp
        } else {
            0
        };
        grant_experience(app, session_id, experience_gained).await;

        let region_info = app.content.region(region);
        app.sessions
            .send_to(
                session_id,
                ServerMessage::RegionChanged {
                    old_region: update.previous_region,
                    new_region: region_info.to_data(),
                    experience_gained,
                    message: format!(
                        "You have entered {}. {}",
                        region_info.name, region_info.description
                    ),
                },
            )
            .await;
        tracing::info!(player = %snapshot.player, region = %region, "Region entered");

        let reports = app
            .quests
            .evaluate_event(&snapshot.player, &GameEvent::RegionEntered { region })
            .await;
        apply_quest_reports(app, session_id, &snapshot.player, reports).await;

        send_region_briefing(app, session_id, &snapshot.player, region).await;
    }

    collect_nearby_objects(app, session_id, &snapshot.player, position).await;

    app.sessions
        .broadcast_to_others(
            session_id,
            ServerMessage::PlayerMoved {
                player_id: snapshot.player.to_string(),
                position: position.into(),
                rotation: rotation.into(),
                region,
            },
        )
        .await;
}

/// Handle a `chat` message: append to history, echo to everyone.
pub async fn handle_chat(app: &App, session_id: SessionId, message: String) {
    let Some(snapshot) = app.sessions.get(session_id).await else {
        return;
    };
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return;
    }

    let entry = ChatEntryData {
        player_id: snapshot.player.to_string(),
        player_name: snapshot.name.clone(),
        message: trimmed.to_string(),
        region: snapshot.region,
        timestamp: Utc::now().timestamp(),
    };
    app.chat.push(entry.clone()).await;
    app.sessions
        .broadcast_to_all(ServerMessage::Chat(entry))
        .await;
}

/// Transport-level disconnect: release the session, persist the profile,
/// tell everyone who is left. Safe to call on an already-gone session.
pub async fn handle_disconnect(app: &App, session_id: SessionId) {
    let Some((event, profile)) = app.sessions.unregister(session_id).await else {
        return;
    };
    let SessionEvent::PlayerLeft(snapshot) = event else {
        return;
    };
    app.profiles.store(snapshot.player.clone(), profile);

    tracing::info!(session_id = %session_id, player = %snapshot.player, "Player left");
    app.sessions
        .broadcast_to_all(ServerMessage::PlayerLeft {
            player_id: snapshot.player.to_string(),
            name: snapshot.name,
        })
        .await;
}

/// Unicast the NPCs and quest log relevant to the player's current region.
async fn send_region_briefing(app: &App, session_id: SessionId, player: &PlayerId, region: Region) {
    let npcs: Vec<NpcData> = app
        .content
        .npcs_in_region(region)
        .into_iter()
        .map(|npc| NpcData {
            id: npc.id.to_string(),
            name: npc.name.clone(),
            personality: npc.personality.key().to_string(),
        })
        .collect();
    app.sessions
        .send_to(session_id, ServerMessage::NpcsInRegion { region, npcs })
        .await;

    let quests: Vec<QuestData> = app
        .quests
        .visible_quests(player)
        .await
        .into_iter()
        .map(|quest| QuestData {
            id: quest.id.to_string(),
            title: quest.title,
            description: quest.description,
            state: quest.state.key().to_string(),
            objectives_total: quest.objectives_total,
            objectives_completed: quest.objectives_completed,
            current_objective: quest.current_objective,
        })
        .collect();
    app.sessions
        .send_to(session_id, ServerMessage::QuestLog { quests })
        .await;
}

/// Collect any world object within the pickup radius that this player has
/// not collected before, and feed the resulting events to the quest engine.
async fn collect_nearby_objects(
    app: &App,
    session_id: SessionId,
    player: &PlayerId,
    position: Position,
) {
    for object in &app.content.world_objects {
        if position.distance_xz(&object.position) > app.config.pickup_radius {
            continue;
        }
        if !app.sessions.collect_item(session_id, object.id.clone()).await {
            continue;
        }
        tracing::info!(player = %player, object = %object.id, "World object collected");
        app.sessions
            .send_to(
                session_id,
                ServerMessage::ItemCollected {
                    item_id: object.item.to_string(),
                    name: object.name.clone(),
                },
            )
            .await;
        let reports = app
            .quests
            .evaluate_event(
                player,
                &GameEvent::ItemCollected {
                    item: object.item.clone(),
                    count: 1,
                },
            )
            .await;
        apply_quest_reports(app, session_id, player, reports).await;
    }
}
