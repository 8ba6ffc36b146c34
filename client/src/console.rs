//! Terminal front-end: prints what a browser page would draw and turns typed
//! lines into user actions.

use std::io::{self, Write};

use crate::admin::AdminAction;
use crate::leaderboard::LeaderboardRow;
use crate::player::PlayerAction;
use crate::presenter::{Candidate, Notice, Presenter, Tone};
use crate::protocol::ImageRef;

pub const ADMIN_HELP: &str = "\
Commands:
  /play            start the next round
  /mark N [N...]   toggle the correct-mark of candidate guesses (1-based)
  /answer TEXT     submit TEXT as the official answer with the marked guesses
  /help            show this help";

pub struct ConsolePresenter<W: Write + Send> {
    out: W,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn render_leaderboard(&mut self, rows: &[LeaderboardRow]) {
        self.line("== Scores ==");
        for row in rows {
            self.line(&row.to_string());
        }
    }

    fn render_candidates(&mut self, candidates: &[Candidate]) {
        self.line("== Guesses ==");
        for (index, candidate) in candidates.iter().enumerate() {
            let mark = if candidate.marked { "x" } else { " " };
            self.line(&format!(
                "[{}] {}. {} - {}",
                mark,
                index + 1,
                candidate.record.guess(),
                candidate.record.display()
            ));
        }
    }

    fn render_answer(&mut self, answer: &str) {
        self.line(&format!("Previous answer: {}", answer));
    }

    fn render_phase(&mut self, text: &str) {
        self.line(&format!("-- {}", text));
    }

    fn clear_guess_input(&mut self) {}

    fn notify(&mut self, notice: Notice) {
        let label = match notice.tone {
            Tone::Neutral => "info",
            Tone::Success => "ok",
            Tone::Caution => "warning",
            Tone::Critical => "error",
        };
        self.line(&format!("[{}] {}", label, notice.text));
    }

    fn add_image(&mut self, image: &ImageRef) {
        self.line(&format!(
            "New image: {} (thumbnail {})",
            image.image_url, image.thumbnail_url
        ));
    }
}

/// A typed line is the guess, exactly as typed.
pub fn parse_player_line(line: &str) -> Vec<PlayerAction> {
    vec![
        PlayerAction::SetGuessInput(line.to_string()),
        PlayerAction::SubmitGuess,
    ]
}

/// Admin lines are slash commands. `Err` carries text to show the operator.
pub fn parse_admin_line(line: &str) -> Result<Vec<AdminAction>, String> {
    let trimmed = line.trim_start();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest),
        None => (trimmed, ""),
    };

    match command {
        "/play" => Ok(vec![AdminAction::StartRound]),
        "/answer" => Ok(vec![
            AdminAction::SetAnswerInput(rest.trim().to_string()),
            AdminAction::SubmitAnswer,
        ]),
        "/mark" => {
            let mut actions = Vec::new();
            for token in rest.split_whitespace() {
                match token.parse::<usize>() {
                    Ok(position) if position > 0 => {
                        actions.push(AdminAction::ToggleCandidate(position - 1))
                    }
                    _ => return Err(format!("Not a guess number: `{}`", token)),
                }
            }
            if actions.is_empty() {
                return Err("Usage: /mark N [N...]".to_string());
            }
            Ok(actions)
        }
        "/help" => Err(ADMIN_HELP.to_string()),
        _ => Err(format!("Unknown command `{}`\n{}", command, ADMIN_HELP)),
    }
}
