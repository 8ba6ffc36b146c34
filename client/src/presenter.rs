use crate::leaderboard::LeaderboardRow;
use crate::protocol::{GuessRecord, ImageRef, Severity};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Success,
    Caution,
    Critical,
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info | Severity::Unknown => Tone::Neutral,
            Severity::Warning => Tone::Caution,
            Severity::Danger => Tone::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
    /// Persistent notices stay until the user dismisses them.
    pub persistent: bool,
}

impl Notice {
    pub fn transient(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
            persistent: false,
        }
    }

    pub fn persistent(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
            persistent: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub record: GuessRecord,
    pub marked: bool,
}

/// Whatever actually draws the game page.
pub trait Presenter: Send {
    fn render_leaderboard(&mut self, rows: &[LeaderboardRow]);
    fn render_candidates(&mut self, candidates: &[Candidate]);
    fn render_answer(&mut self, answer: &str);
    fn render_phase(&mut self, text: &str);
    fn clear_guess_input(&mut self);
    fn notify(&mut self, notice: Notice);
    fn add_image(&mut self, image: &ImageRef);
}
