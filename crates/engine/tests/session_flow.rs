//! Coordinator fan-out semantics, driven through the message handlers with
//! plain channels standing in for sockets.

use std::sync::Arc;

use tokio::sync::mpsc;

use horizon_domain::{Position, Region, Rotation, SessionId};
use horizon_engine::api::websocket::{ws_npc, ws_query, ws_session};
use horizon_engine::config::EngineConfig;
use horizon_engine::infrastructure::InMemorySnapshotStore;
use horizon_engine::App;
use horizon_shared::ServerMessage;

struct TestClient {
    session_id: SessionId,
    rx: mpsc::Receiver<ServerMessage>,
}

impl TestClient {
    fn drain(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }
}

fn test_app() -> App {
    App::new(EngineConfig::default(), Arc::new(InMemorySnapshotStore::new()))
}

async fn connect(app: &App, player_id: &str, name: &str) -> TestClient {
    let (tx, rx) = mpsc::channel(256);
    let session_id = ws_session::handle_connect(app, tx, player_id.to_string(), name.to_string())
        .await
        .expect("connect accepted");
    TestClient { session_id, rx }
}

fn has_type(messages: &[ServerMessage], predicate: impl Fn(&ServerMessage) -> bool) -> bool {
    messages.iter().any(predicate)
}

#[tokio::test]
async fn concurrent_joins_see_each_other_but_not_themselves() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    let mut bala = connect(&app, "bala", "Bala").await;

    assert_ne!(alice.session_id, bala.session_id);

    let alice_messages = alice.drain();
    let bala_messages = bala.drain();

    // each got a welcome addressed to themselves
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::Welcome { player_id, .. } if player_id == "alice"
    )));
    assert!(has_type(&bala_messages, |m| matches!(
        m,
        ServerMessage::Welcome { player_id, .. } if player_id == "bala"
    )));

    // Alice learns about Bala (join broadcast), Bala about Alice (roster
    // catch-up); neither hears about themselves
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::PlayerJoined { player } if player.id == "bala"
    )));
    assert!(!has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::PlayerJoined { player } if player.id == "alice"
    )));
    assert!(has_type(&bala_messages, |m| matches!(
        m,
        ServerMessage::PlayerJoined { player } if player.id == "alice"
    )));
    assert!(!has_type(&bala_messages, |m| matches!(
        m,
        ServerMessage::PlayerJoined { player } if player.id == "bala"
    )));

    // both got a quest log with the starter quests visible
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::QuestLog { quests } if !quests.is_empty()
    )));
}

#[tokio::test]
async fn moving_into_indrapura_completes_the_enter_objective() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    let mut bala = connect(&app, "bala", "Bala").await;
    alice.drain();
    bala.drain();

    // (120, 0, 40) is inside the Indrapura City bounds
    ws_session::handle_move(
        &app,
        alice.session_id,
        Position::new(120.0, 0.0, 40.0),
        Rotation::default(),
    )
    .await;

    let alice_messages = alice.drain();
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::RegionChanged { new_region, experience_gained, .. }
            if new_region.key == Region::IndrapuraCity && *experience_gained == 100
    )));
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::QuestStarted { quest_id, .. } if quest_id == "main_001_scholars_call"
    )));
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::QuestObjective { objective_id, completed: true, .. }
            if objective_id == "travel_to_city"
    )));
    // the sender never receives their own movement
    assert!(!has_type(&alice_messages, |m| matches!(m, ServerMessage::PlayerMoved { .. })));

    let bala_messages = bala.drain();
    assert!(has_type(&bala_messages, |m| matches!(
        m,
        ServerMessage::PlayerMoved { player_id, region, .. }
            if player_id == "alice" && *region == Region::IndrapuraCity
    )));
}

#[tokio::test]
async fn observers_see_movement_in_send_order() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    let mut bala = connect(&app, "bala", "Bala").await;
    alice.drain();
    bala.drain();

    let xs = [240.0_f32, 230.0, 220.0, 210.0, 205.0];
    for x in xs {
        ws_session::handle_move(
            &app,
            alice.session_id,
            Position::new(x, 2.0, 0.0),
            Rotation::default(),
        )
        .await;
    }

    let observed: Vec<f32> = bala
        .drain()
        .into_iter()
        .filter_map(|m| match m {
            ServerMessage::PlayerMoved { position, .. } => Some(position.x),
            _ => None,
        })
        .collect();
    assert_eq!(observed, xs.to_vec());
}

#[tokio::test]
async fn chat_echoes_to_everyone_including_the_sender() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    let mut bala = connect(&app, "bala", "Bala").await;
    alice.drain();
    bala.drain();

    ws_session::handle_chat(&app, alice.session_id, "namaste!".to_string()).await;

    for client in [&mut alice, &mut bala] {
        let messages = client.drain();
        assert!(has_type(&messages, |m| matches!(
            m,
            ServerMessage::Chat(entry)
                if entry.player_id == "alice" && entry.message == "namaste!"
        )));
    }

    // a later joiner gets the line replayed as history
    let mut chitra = connect(&app, "chitra", "Chitra").await;
    let messages = chitra.drain();
    assert!(has_type(&messages, |m| matches!(
        m,
        ServerMessage::ChatHistory { messages } if messages.len() == 1
    )));
}

#[tokio::test]
async fn npc_responses_are_unicast_and_advance_talk_objectives() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    let mut bala = connect(&app, "bala", "Bala").await;
    alice.drain();
    bala.drain();

    // move into the city first so the scholars call is in progress
    ws_session::handle_move(
        &app,
        alice.session_id,
        Position::new(120.0, 0.0, 40.0),
        Rotation::default(),
    )
    .await;
    alice.drain();
    bala.drain();

    ws_npc::handle_npc_interaction(
        &app,
        alice.session_id,
        "arunima".to_string(),
        "Namaste, scholar".to_string(),
    )
    .await;

    let alice_messages = alice.drain();
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::NpcInteraction { npc_id, response }
            if npc_id == "arunima" && !response.is_empty()
    )));
    assert!(has_type(&alice_messages, |m| matches!(
        m,
        ServerMessage::QuestCompleted { quest_id, experience_gained, .. }
            if quest_id == "main_001_scholars_call" && *experience_gained == 100
    )));

    // nothing about the conversation reaches other players
    assert!(bala.drain().is_empty());
}

#[tokio::test]
async fn unknown_npc_interaction_is_a_silent_noop() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    alice.drain();

    ws_npc::handle_npc_interaction(
        &app,
        alice.session_id,
        "nobody".to_string(),
        "hello?".to_string(),
    )
    .await;

    assert!(alice.drain().is_empty());
}

#[tokio::test]
async fn walking_over_a_fragment_collects_it_once() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    alice.drain();

    // the Dust Plains fragment placement
    let fragment_spot = Position::new(-320.0, 0.0, 20.0);
    ws_session::handle_move(&app, alice.session_id, fragment_spot, Rotation::default()).await;
    let first = alice.drain();
    assert!(has_type(&first, |m| matches!(
        m,
        ServerMessage::ItemCollected { item_id, .. } if item_id == "sarasvati_fragment"
    )));

    // stepping on it again does nothing
    ws_session::handle_move(&app, alice.session_id, fragment_spot, Rotation::default()).await;
    let second = alice.drain();
    assert!(!has_type(&second, |m| matches!(m, ServerMessage::ItemCollected { .. })));
}

#[tokio::test]
async fn disconnect_broadcasts_player_left_and_is_idempotent() {
    let app = test_app();
    let alice = connect(&app, "alice", "Alice").await;
    let mut bala = connect(&app, "bala", "Bala").await;
    bala.drain();

    ws_session::handle_disconnect(&app, alice.session_id).await;
    let messages = bala.drain();
    assert!(has_type(&messages, |m| matches!(
        m,
        ServerMessage::PlayerLeft { player_id, .. } if player_id == "alice"
    )));

    // second disconnect is a no-op
    ws_session::handle_disconnect(&app, alice.session_id).await;
    assert!(bala.drain().is_empty());

    // dialogue and quest state survive the disconnect
    let mut alice_again = connect(&app, "alice", "Alice").await;
    let messages = alice_again.drain();
    assert!(has_type(&messages, |m| matches!(
        m,
        ServerMessage::Welcome { player_id, .. } if player_id == "alice"
    )));
}

#[tokio::test]
async fn status_query_reports_population_by_region() {
    let app = test_app();
    let mut alice = connect(&app, "alice", "Alice").await;
    let _bala = connect(&app, "bala", "Bala").await;
    alice.drain();

    ws_query::handle_status_query(&app, alice.session_id).await;

    let messages = alice.drain();
    let status = messages
        .iter()
        .find_map(|m| match m {
            ServerMessage::Status {
                players_online,
                regions,
            } => Some((*players_online, regions.clone())),
            _ => None,
        })
        .expect("status response");
    assert_eq!(status.0, 2);
    let frontier = status
        .1
        .iter()
        .find(|entry| entry.region == Region::OceanFrontier)
        .expect("frontier entry");
    assert_eq!(frontier.players, 2);
}

#[tokio::test]
async fn reconnecting_restores_the_saved_position() {
    let app = test_app();
    let alice = connect(&app, "alice", "Alice").await;

    ws_session::handle_move(
        &app,
        alice.session_id,
        Position::new(120.0, 0.0, 40.0),
        Rotation::default(),
    )
    .await;
    ws_session::handle_disconnect(&app, alice.session_id).await;

    let mut alice_again = connect(&app, "alice", "Alice").await;
    let messages = alice_again.drain();
    let welcome = messages
        .iter()
        .find_map(|m| match m {
            ServerMessage::Welcome {
                position, region, ..
            } => Some((*position, region.clone())),
            _ => None,
        })
        .expect("welcome");
    assert!((welcome.0.x - 120.0).abs() < f32::EPSILON);
    assert_eq!(welcome.1.key, Region::IndrapuraCity);
}
