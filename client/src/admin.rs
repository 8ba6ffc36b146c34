use tracing::warn;

use crate::client::RoleDriver;
use crate::leaderboard;
use crate::phase::RoundPhase;
use crate::presenter::{Candidate, Notice, Presenter, Tone};
use crate::protocol::{AdminCommand, GuessRecord, ImageRef, PhaseCommand, ScoreEntry};

const WAITING_TEXT: &str = "If there are any submissions, please select correct ones \
(indexing guidelines allow minor variances and thus there could possibly be a few correct answers) \
and submit a singular, official answer with the appropriate capital letters. Start the next round.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    SetAnswerInput(String),
    /// Flip the correct-mark of the candidate at this index.
    ToggleCandidate(usize),
    SubmitAnswer,
    StartRound,
}

#[derive(Debug, Default)]
pub struct AdminDriver {
    answer_input: String,
    candidates: Vec<Candidate>,
}

impl AdminDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_input(&self) -> &str {
        &self.answer_input
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn correct_answers(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.marked)
            .map(|candidate| candidate.record.guess().to_string())
            .collect()
    }
}

impl RoleDriver for AdminDriver {
    type Command = AdminCommand;
    type Action = AdminAction;

    fn role(&self) -> &'static str {
        "admin"
    }

    fn phase_text(&self, phase: RoundPhase) -> String {
        match phase {
            RoundPhase::Playing { remaining } => {
                format!("Players have {} seconds left to guess.", remaining)
            }
            RoundPhase::Waiting => WAITING_TEXT.to_string(),
        }
    }

    fn on_scores(
        &mut self,
        scores: Vec<ScoreEntry>,
        _num_top_players: Option<usize>,
        presenter: &mut dyn Presenter,
    ) {
        presenter.render_leaderboard(&leaderboard::full(&scores));
    }

    fn on_answer(&mut self, answer: String, presenter: &mut dyn Presenter) {
        self.answer_input.clear();
        self.candidates.clear();
        presenter.notify(Notice::transient(
            Tone::Success,
            "The correct answer has been submitted!",
        ));
        presenter.clear_guess_input();
        presenter.render_leaderboard(&[]);
        presenter.render_candidates(&[]);
        presenter.render_answer(&answer);
    }

    fn on_guesses(&mut self, guesses: Vec<GuessRecord>, presenter: &mut dyn Presenter) {
        self.candidates = guesses
            .into_iter()
            .map(|record| Candidate {
                record,
                marked: false,
            })
            .collect();
        presenter.render_candidates(&self.candidates);
    }

    fn on_images(&mut self, images: Vec<ImageRef>, presenter: &mut dyn Presenter) {
        for image in &images {
            presenter.add_image(image);
        }
    }

    fn handle_action(
        &mut self,
        action: AdminAction,
        presenter: &mut dyn Presenter,
    ) -> Option<AdminCommand> {
        match action {
            AdminAction::SetAnswerInput(text) => {
                self.answer_input = text;
                None
            }
            AdminAction::ToggleCandidate(index) => {
                match self.candidates.get_mut(index) {
                    Some(candidate) => {
                        candidate.marked = !candidate.marked;
                        presenter.render_candidates(&self.candidates);
                    }
                    None => warn!(
                        index,
                        count = self.candidates.len(),
                        "No candidate guess at this position"
                    ),
                }
                None
            }
            AdminAction::SubmitAnswer => Some(AdminCommand::SubmitAnswer {
                display_answer: self.answer_input.clone(),
                correct_answers: self.correct_answers(),
            }),
            AdminAction::StartRound => Some(AdminCommand::UpdatePhase {
                phase: PhaseCommand::Play,
            }),
        }
    }
}
