//! WebSocket handling for game clients.
//!
//! One socket per player. The first message must be `connect`; everything
//! before that (or anything malformed) is dropped without closing the
//! connection. Outbound traffic goes through a bounded per-connection
//! channel drained by a writer task, so a slow consumer can only lose its
//! own messages.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

pub mod ws_npc;
pub mod ws_query;
pub mod ws_session;

use horizon_domain::{PlayerId, SessionId};
use horizon_shared::{ClientMessage, ServerMessage};

use crate::app::App;
use crate::use_cases::QuestAdvanceReport;

/// Buffer size for the per-connection outbound channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app): State<Arc<App>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

/// Handle an individual WebSocket connection for its whole lifetime.
async fn handle_socket(socket: WebSocket, app: Arc<App>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    // Forward outbound messages from the channel to the socket.
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Ok(json) = message.to_json() {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    let mut session_id: Option<SessionId> = None;

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match ClientMessage::parse(text.as_str()) {
                Ok(message) => {
                    dispatch(&app, &mut session_id, &tx, message).await;
                }
                Err(error) => {
                    // protocol error: drop the message, keep the connection
                    tracing::warn!(error = %error, "Dropping malformed message");
                }
            },
            Ok(Message::Close(_)) => {
                tracing::debug!(session_id = ?session_id, "WebSocket closed by client");
                break;
            }
            Err(error) => {
                tracing::debug!(session_id = ?session_id, error = %error, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    if let Some(id) = session_id {
        ws_session::handle_disconnect(&app, id).await;
    }
    send_task.abort();
}

/// Route a parsed message. State errors (unknown session, pre-connect
/// traffic) are no-ops; only the coordinator logs them.
async fn dispatch(
    app: &App,
    session_id: &mut Option<SessionId>,
    tx: &mpsc::Sender<ServerMessage>,
    message: ClientMessage,
) {
    match (message, *session_id) {
        (ClientMessage::Connect { .. }, Some(id)) => {
            tracing::debug!(session_id = %id, "Duplicate connect ignored");
        }
        (
            ClientMessage::Connect {
                player_id,
                player_name,
            },
            None,
        ) => {
            *session_id =
                ws_session::handle_connect(app, tx.clone(), player_id, player_name).await;
        }
        (_, None) => {
            tracing::debug!("Message before connect dropped");
        }
        (ClientMessage::Move { position, rotation }, Some(id)) => {
            ws_session::handle_move(app, id, position.into(), rotation.into()).await;
        }
        (ClientMessage::Chat { message }, Some(id)) => {
            ws_session::handle_chat(app, id, message).await;
        }
        (ClientMessage::NpcInteraction { npc_id, message }, Some(id)) => {
            ws_npc::handle_npc_interaction(app, id, npc_id, message).await;
        }
        (ClientMessage::StatusQuery, Some(id)) => {
            ws_query::handle_status_query(app, id).await;
        }
    }
}

/// Grant experience to a session and announce a level-up if one happened.
pub(crate) async fn grant_experience(app: &App, session_id: SessionId, amount: u32) {
    if amount == 0 {
        return;
    }
    if let Some(level) = app.sessions.add_experience(session_id, amount).await {
        app.sessions
            .send_to(session_id, ServerMessage::LevelUp { level })
            .await;
    }
}

/// Fan out quest advances to the acting player and apply completion
/// rewards: experience to the session, reputation to conversation memory,
/// item grants to the profile.
pub(crate) async fn apply_quest_reports(
    app: &App,
    session_id: SessionId,
    player: &PlayerId,
    reports: Vec<QuestAdvanceReport>,
) {
    use horizon_domain::QuestAdvance;

    for report in reports {
        if report.newly_started {
            app.sessions
                .send_to(
                    session_id,
                    ServerMessage::QuestStarted {
                        quest_id: report.quest.to_string(),
                        title: report.title.clone(),
                    },
                )
                .await;
        }

        let definition = app.content.quest(&report.quest);
        let describe = |objective_id: &horizon_domain::ObjectiveId| {
            definition
                .and_then(|quest| {
                    quest
                        .objectives
                        .iter()
                        .find(|objective| &objective.id == objective_id)
                })
                .map(|objective| (objective.description.clone(), objective.rule.target()))
                .unwrap_or_else(|| (objective_id.to_string(), 1))
        };

        match &report.advance {
            QuestAdvance::ObjectiveProgress {
                objective,
                current,
                required,
            } => {
                let (description, _) = describe(objective);
                app.sessions
                    .send_to(
                        session_id,
                        ServerMessage::QuestObjective {
                            quest_id: report.quest.to_string(),
                            objective_id: objective.to_string(),
                            description,
                            current: *current,
                            required: *required,
                            completed: false,
                        },
                    )
                    .await;
            }
            QuestAdvance::ObjectiveCompleted { objective } => {
                let (description, required) = describe(objective);
                app.sessions
                    .send_to(
                        session_id,
                        ServerMessage::QuestObjective {
                            quest_id: report.quest.to_string(),
                            objective_id: objective.to_string(),
                            description,
                            current: required,
                            required,
                            completed: true,
                        },
                    )
                    .await;
            }
            QuestAdvance::QuestCompleted { .. } => {
                let reward = report.reward.clone().unwrap_or_default();
                app.sessions
                    .send_to(
                        session_id,
                        ServerMessage::QuestCompleted {
                            quest_id: report.quest.to_string(),
                            title: report.title.clone(),
                            experience_gained: reward.experience,
                        },
                    )
                    .await;
                grant_experience(app, session_id, reward.experience).await;
                for (npc, amount) in reward.reputation {
                    app.dialogue.bump_relationship(&npc, player, amount).await;
                }
                for item in reward.items {
                    app.sessions.collect_item(session_id, item).await;
                }
                tracing::info!(
                    player = %player,
                    quest = %report.quest,
                    "Quest completed"
                );
            }
        }
    }
}
