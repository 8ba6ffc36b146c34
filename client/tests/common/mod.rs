#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;
use tokio::sync::mpsc;

use friendexing_client::{
    connection::Connection,
    leaderboard::LeaderboardRow,
    presenter::{Candidate, Notice, Presenter},
    protocol::ImageRef,
    ClientError,
};

/// Everything the client has drawn so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub leaderboard: Vec<LeaderboardRow>,
    pub candidates: Vec<Candidate>,
    pub answer: Option<String>,
    pub phase_history: Vec<String>,
    pub notices: Vec<Notice>,
    pub images: Vec<ImageRef>,
    pub input_clears: usize,
}

impl Page {
    pub fn phase(&self) -> Option<&str> {
        self.phase_history.last().map(String::as_str)
    }
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    page: Arc<Mutex<Page>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> MutexGuard<'_, Page> {
        self.page.lock()
    }

    pub fn snapshot(&self) -> Page {
        self.page.lock().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn render_leaderboard(&mut self, rows: &[LeaderboardRow]) {
        self.page.lock().leaderboard = rows.to_vec();
    }

    fn render_candidates(&mut self, candidates: &[Candidate]) {
        self.page.lock().candidates = candidates.to_vec();
    }

    fn render_answer(&mut self, answer: &str) {
        self.page.lock().answer = Some(answer.to_string());
    }

    fn render_phase(&mut self, text: &str) {
        self.page.lock().phase_history.push(text.to_string());
    }

    fn clear_guess_input(&mut self) {
        self.page.lock().input_clears += 1;
    }

    fn notify(&mut self, notice: Notice) {
        self.page.lock().notices.push(notice);
    }

    fn add_image(&mut self, image: &ImageRef) {
        self.page.lock().images.push(image.clone());
    }
}

/// In-memory stand-in for the WebSocket.
pub struct MemoryConnection {
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<String>,
}

/// The server's end of a [`MemoryConnection`]. Dropping `to_client` closes it.
pub struct ServerSide {
    pub to_client: mpsc::UnboundedSender<String>,
    pub from_client: mpsc::UnboundedReceiver<String>,
}

impl ServerSide {
    pub fn push(&self, frame: Value) {
        self.to_client.send(frame.to_string()).unwrap();
    }

    pub async fn next_command(&mut self) -> Value {
        let frame = self.from_client.recv().await.expect("client hung up");
        serde_json::from_str(&frame).unwrap()
    }
}

pub fn memory_pair() -> (MemoryConnection, ServerSide) {
    let (to_client, inbound) = mpsc::unbounded_channel();
    let (outbound, from_client) = mpsc::unbounded_channel();
    (
        MemoryConnection { inbound, outbound },
        ServerSide {
            to_client,
            from_client,
        },
    )
}

#[async_trait]
impl Connection for MemoryConnection {
    fn send_text(&self, frame: String) -> Result<(), ClientError> {
        self.outbound
            .send(frame)
            .map_err(|_| ClientError::ConnectionClosed)
    }

    async fn recv_text(&mut self) -> Option<Result<String, ClientError>> {
        self.inbound.recv().await.map(Ok)
    }
}

pub fn frame(value: Value) -> String {
    value.to_string()
}
