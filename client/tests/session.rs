mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use common::{memory_pair, RecordingPresenter, ServerSide};
use friendexing_client::{
    client::CONNECTION_LOST,
    player::{PlayerAction, PlayerDriver},
    presenter::{Notice, Tone},
    session, Client, ConnectionState, RoundPhase,
};

const WAITING: &str = "Waiting for the admin to advance the game";

type PlayerClient = Client<PlayerDriver, RecordingPresenter>;

fn start() -> (
    ServerSide,
    RecordingPresenter,
    mpsc::UnboundedSender<PlayerAction>,
    tokio::task::JoinHandle<PlayerClient>,
) {
    let (connection, server) = memory_pair();
    let presenter = RecordingPresenter::new();
    let client = Client::new(PlayerDriver::new(), presenter.clone());
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(session::run(connection, client, rx));
    (server, presenter, tx, handle)
}

fn seconds(n: u32) -> String {
    format!("Seconds left to guess: {n}")
}

#[tokio::test(start_paused = true)]
async fn countdown_reaches_waiting_without_server() {
    let (server, presenter, _tx, _handle) = start();
    server.push(json!({"type": "update_state", "phase": "play", "time_remaining": 3}));

    sleep(Duration::from_millis(3500)).await;
    assert_eq!(
        presenter.snapshot().phase_history,
        vec![WAITING.to_string(), seconds(3), seconds(2), seconds(1), WAITING.to_string()]
    );

    // Nothing keeps ticking once waiting.
    sleep(Duration::from_secs(10)).await;
    assert_eq!(presenter.page().phase_history.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn wait_push_cancels_countdown() {
    let (server, presenter, _tx, _handle) = start();
    server.push(json!({"type": "update_state", "phase": "play", "time_remaining": 10}));
    sleep(Duration::from_millis(2500)).await;

    server.push(json!({"type": "update_state", "phase": "wait"}));
    server.push(json!({"type": "update_state", "phase": "wait"}));
    sleep(Duration::from_secs(20)).await;

    assert_eq!(
        presenter.snapshot().phase_history,
        vec![
            WAITING.to_string(),
            seconds(10),
            seconds(9),
            seconds(8),
            WAITING.to_string(),
            WAITING.to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn fresh_play_push_replaces_countdown() {
    let (server, presenter, _tx, _handle) = start();
    server.push(json!({"type": "update_state", "phase": "play", "time_remaining": 10}));
    sleep(Duration::from_millis(1500)).await;

    server.push(json!({"type": "update_state", "phase": "play", "time_remaining": 5}));
    sleep(Duration::from_millis(2500)).await;

    // One tick per second: a leftover countdown would show extra steps.
    assert_eq!(
        presenter.snapshot().phase_history,
        vec![
            WAITING.to_string(),
            seconds(10),
            seconds(9),
            seconds(5),
            seconds(4),
            seconds(3),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn malformed_frame_keeps_session_alive() {
    let (mut server, presenter, tx, _handle) = start();
    server.to_client.send("{\"type\":\"bogus\"}".to_string()).unwrap();
    server.push(json!({"type": "show_answer", "answer": "Paris"}));
    sleep(Duration::from_millis(10)).await;
    assert_eq!(presenter.page().answer.as_deref(), Some("Paris"));

    tx.send(PlayerAction::SetGuessInput("London".into())).unwrap();
    tx.send(PlayerAction::SubmitGuess).unwrap();
    assert_eq!(
        server.next_command().await,
        json!({"type": "guess", "guess": "London"})
    );
}

#[tokio::test(start_paused = true)]
async fn server_close_ends_session() {
    let (server, presenter, tx, handle) = start();
    server.push(json!({"type": "update_state", "phase": "play", "time_remaining": 30}));
    sleep(Duration::from_millis(10)).await;
    drop(server);

    let mut client = handle.await.unwrap();
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert_eq!(client.phase(), RoundPhase::Playing { remaining: 30 });
    assert_eq!(
        presenter.page().notices,
        vec![Notice::persistent(Tone::Critical, CONNECTION_LOST)]
    );

    drop(tx);
    assert_eq!(client.handle_action(PlayerAction::SubmitGuess), None);
}
