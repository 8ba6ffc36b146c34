use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, MalformedMessage};
use crate::protocol::{AdminCommand, PhaseName, PlayerCommand, ServerEvent, INBOUND_TAGS};

/// Marker for the command families a client is allowed to put on the wire.
pub trait OutboundCommand: Serialize {}

impl OutboundCommand for AdminCommand {}
impl OutboundCommand for PlayerCommand {}

/// Serialize one command into one text frame.
pub fn encode<C: OutboundCommand>(command: &C) -> Result<String, ClientError> {
    Ok(serde_json::to_string(command)?)
}

/// Parse one inbound frame. Either a complete event comes back or nothing does.
pub fn decode(frame: &str) -> Result<ServerEvent, MalformedMessage> {
    let value: Value =
        serde_json::from_str(frame).map_err(|e| MalformedMessage::NotJson(e.to_string()))?;
    let Value::Object(fields) = &value else {
        return Err(MalformedMessage::NotObject);
    };

    let tag = match fields.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        _ => return Err(MalformedMessage::MissingTag),
    };
    if !INBOUND_TAGS.contains(&tag.as_str()) {
        return Err(MalformedMessage::UnrecognizedTag(tag));
    }

    let event: ServerEvent =
        serde_json::from_value(value).map_err(|e| MalformedMessage::InvalidPayload {
            tag: tag.clone(),
            reason: e.to_string(),
        })?;

    if let ServerEvent::UpdateState {
        phase: PhaseName::Play,
        time_remaining: None,
    } = event
    {
        return Err(MalformedMessage::InvalidPayload {
            tag,
            reason: "`time_remaining` is required when phase is `play`".to_string(),
        });
    }

    Ok(event)
}
