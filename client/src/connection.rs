use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures_util::{stream::SplitStream, SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ClientError;

/// A persistent duplex channel of text frames.
#[async_trait]
pub trait Connection: Send {
    /// Queue one frame. Fire-and-forget: no acknowledgement is tracked.
    fn send_text(&self, frame: String) -> Result<(), ClientError>;

    /// Wait for the next text frame. `None` once the channel is closed.
    async fn recv_text(&mut self) -> Option<Result<String, ClientError>>;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket connection to the game server.
pub struct WsConnection {
    tx: mpsc::UnboundedSender<WsMessage>,
    receiver: SplitStream<WsStream>,
    stats: Arc<Mutex<ConnectionStats>>,
}

#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    pub bytes_out: u64,
    pub bytes_in: u64,
    pub frames_out: u64,
    pub frames_in: u64,
    pub connected_since: Option<Instant>,
    /// Set once the connection has ended, cleanly or not.
    pub closed_at: Option<Instant>,
}

impl ConnectionStats {
    fn record_outgoing(&mut self, bytes: usize) {
        self.bytes_out += bytes as u64;
        self.frames_out += 1;
    }

    fn record_incoming(&mut self, bytes: usize) {
        self.bytes_in += bytes as u64;
        self.frames_in += 1;
    }
}

impl WsConnection {
    pub async fn connect(url: &Url) -> Result<Self, ClientError> {
        let (ws_stream, _) = connect_async(url.as_str()).await?;
        info!("Connected to {}", url);

        let (mut ws_sender, receiver) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

        // Sender task
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    warn!("Failed to send frame: {}", e);
                    break;
                }
            }
            let _ = ws_sender.close().await;
        });

        let stats = ConnectionStats {
            connected_since: Some(Instant::now()),
            ..Default::default()
        };

        Ok(Self {
            tx,
            receiver,
            stats: Arc::new(Mutex::new(stats)),
        })
    }

    pub fn stats(&self) -> ConnectionStats {
        self.stats.lock().clone()
    }

    /// Record the end of the connection and log its statistics, once.
    fn finish(&self) {
        let mut stats = self.stats.lock();
        if stats.closed_at.is_some() {
            return;
        }
        let now = Instant::now();
        stats.closed_at = Some(now);
        let connected_secs = stats
            .connected_since
            .map(|since| now.duration_since(since).as_secs_f32())
            .unwrap_or_default();
        info!(
            frames_in = stats.frames_in,
            frames_out = stats.frames_out,
            bytes_in = stats.bytes_in,
            bytes_out = stats.bytes_out,
            connected_secs,
            "Connection statistics"
        );
    }
}

#[async_trait]
impl Connection for WsConnection {
    fn send_text(&self, frame: String) -> Result<(), ClientError> {
        self.stats.lock().record_outgoing(frame.len());
        self.tx
            .send(WsMessage::Text(frame.into()))
            .map_err(|_| ClientError::ConnectionClosed)
    }

    async fn recv_text(&mut self) -> Option<Result<String, ClientError>> {
        loop {
            match self.receiver.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    self.stats.lock().record_incoming(text.len());
                    return Some(Ok(text.as_str().to_owned()));
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!(?frame, "Server closed the connection");
                    self.finish();
                    return None;
                }
                Some(Ok(other)) => {
                    debug!("Skipping non-text frame of {} bytes", other.len());
                }
                Some(Err(e)) => {
                    self.finish();
                    return Some(Err(e.into()));
                }
                None => {
                    self.finish();
                    return None;
                }
            }
        }
    }
}
