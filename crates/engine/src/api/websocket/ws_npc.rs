//! NPC interaction handling.

use horizon_domain::{GameEvent, NpcId, SessionId};
use horizon_shared::ServerMessage;

use crate::app::App;

use super::apply_quest_reports;

/// Handle an `npc_interaction` message: run the dialogue engine, unicast
/// the response to the sender only, and feed the interaction (plus every
/// discussed topic) to the quest engine.
pub async fn handle_npc_interaction(
    app: &App,
    session_id: SessionId,
    npc_id: String,
    message: String,
) {
    let Some(snapshot) = app.sessions.get(session_id).await else {
        return;
    };
    let npc = NpcId::new(npc_id);

    let Some(outcome) = app
        .dialogue
        .interact(&npc, &snapshot.player, &message, snapshot.level)
        .await
    else {
        // unknown NPC: a state error, treated as a no-op
        tracing::debug!(npc = %npc, "Interaction with unknown NPC dropped");
        return;
    };

    app.sessions
        .send_to(
            session_id,
            ServerMessage::NpcInteraction {
                npc_id: npc.to_string(),
                response: outcome.response,
            },
        )
        .await;

    let mut reports = app
        .quests
        .evaluate_event(&snapshot.player, &GameEvent::NpcInteracted { npc: npc.clone() })
        .await;
    for topic in outcome.topics {
        reports.extend(
            app.quests
                .evaluate_event(
                    &snapshot.player,
                    &GameEvent::TopicDiscussed {
                        npc: npc.clone(),
                        topic,
                    },
                )
                .await,
        );
    }
    apply_quest_reports(app, session_id, &snapshot.player, reports).await;
}
