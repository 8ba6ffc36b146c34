use serde::{Deserialize, Serialize};

/// Tags the server may put in the `type` field of a frame.
pub const INBOUND_TAGS: &[&str] = &[
    "update_state",
    "update_scores",
    "update_guesses",
    "show_answer",
    "show_message",
    "add_images",
    "reject_guess",
];

/// Events pushed by the game server (must match server protocol)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    UpdateState {
        phase: PhaseName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_remaining: Option<i64>,
    },
    UpdateScores {
        scores: Vec<ScoreEntry>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        num_top_players: Option<usize>,
    },
    UpdateGuesses {
        guesses: Vec<GuessRecord>,
    },
    ShowAnswer {
        answer: String,
    },
    ShowMessage {
        severity: Severity,
        message: String,
    },
    AddImages {
        images: Vec<ImageRef>,
    },
    RejectGuess {
        message: String,
    },
}

impl ServerEvent {
    pub fn tag(&self) -> &'static str {
        match self {
            ServerEvent::UpdateState { .. } => "update_state",
            ServerEvent::UpdateScores { .. } => "update_scores",
            ServerEvent::UpdateGuesses { .. } => "update_guesses",
            ServerEvent::ShowAnswer { .. } => "show_answer",
            ServerEvent::ShowMessage { .. } => "show_message",
            ServerEvent::AddImages { .. } => "add_images",
            ServerEvent::RejectGuess { .. } => "reject_guess",
        }
    }
}

/// Commands the admin page sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdminCommand {
    SubmitAnswer {
        display_answer: String,
        correct_answers: Vec<String>,
    },
    UpdatePhase {
        phase: PhaseCommand,
    },
}

/// Commands a player page sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerCommand {
    Guess { guess: String },
}

/// Phase names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    Play,
    Wait,
}

/// The admin can only ever start a round; waiting is entered by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseCommand {
    Play,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
}

/// A submitted guess and the form shown to the admin, sent as `[guess, display]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord(pub String, pub String);

impl GuessRecord {
    pub fn guess(&self) -> &str {
        &self.0
    }

    pub fn display(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub thumbnail_url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
    #[serde(other)]
    Unknown,
}
