use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// A frame that could not be turned into exactly one well-typed event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedMessage {
    #[error("frame is not valid JSON: {0}")]
    NotJson(String),
    #[error("frame is not a JSON object")]
    NotObject,
    #[error("frame has no `type` tag")]
    MissingTag,
    #[error("unrecognized message type `{0}`")]
    UnrecognizedTag(String),
    #[error("invalid `{tag}` message: {reason}")]
    InvalidPayload { tag: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection closed")]
    ConnectionClosed,
    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}
