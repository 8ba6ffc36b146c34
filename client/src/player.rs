use crate::client::RoleDriver;
use crate::leaderboard;
use crate::phase::RoundPhase;
use crate::presenter::{Notice, Presenter, Tone};
use crate::protocol::{PlayerCommand, ScoreEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    SetGuessInput(String),
    SubmitGuess,
}

#[derive(Debug, Default)]
pub struct PlayerDriver {
    guess_input: String,
}

impl PlayerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guess_input(&self) -> &str {
        &self.guess_input
    }
}

impl RoleDriver for PlayerDriver {
    type Command = PlayerCommand;
    type Action = PlayerAction;

    fn role(&self) -> &'static str {
        "player"
    }

    fn phase_text(&self, phase: RoundPhase) -> String {
        match phase {
            RoundPhase::Playing { remaining } => format!("Seconds left to guess: {}", remaining),
            RoundPhase::Waiting => "Waiting for the admin to advance the game".to_string(),
        }
    }

    fn on_scores(
        &mut self,
        scores: Vec<ScoreEntry>,
        num_top_players: Option<usize>,
        presenter: &mut dyn Presenter,
    ) {
        presenter.render_leaderboard(&leaderboard::for_player(&scores, num_top_players));
    }

    fn on_answer(&mut self, answer: String, presenter: &mut dyn Presenter) {
        self.guess_input.clear();
        presenter.notify(Notice::transient(
            Tone::Neutral,
            "A correct answer has been chosen!",
        ));
        presenter.clear_guess_input();
        presenter.render_answer(&answer);
    }

    // The input stays as typed so the guess can be fixed and resent.
    fn on_reject(&mut self, message: String, presenter: &mut dyn Presenter) {
        presenter.notify(Notice::transient(Tone::Caution, message));
    }

    fn handle_action(
        &mut self,
        action: PlayerAction,
        _presenter: &mut dyn Presenter,
    ) -> Option<PlayerCommand> {
        match action {
            PlayerAction::SetGuessInput(text) => {
                self.guess_input = text;
                None
            }
            PlayerAction::SubmitGuess => Some(PlayerCommand::Guess {
                guess: self.guess_input.clone(),
            }),
        }
    }
}
