use std::fmt;

use tracing::{debug, error, info, warn};

use crate::codec::{self, OutboundCommand};
use crate::phase::{Countdown, PhaseMachine, RoundPhase};
use crate::presenter::{Notice, Presenter, Tone};
use crate::protocol::{GuessRecord, ImageRef, ScoreEntry, ServerEvent, Severity};

pub const CONNECTION_LOST: &str = "Connection lost, please reload to keep playing!";

/// Per-role half of a client: how events are shown and how local actions
/// become commands. Events a role has no use for are logged and dropped.
pub trait RoleDriver: Send {
    type Command: OutboundCommand;
    type Action: Send + fmt::Debug;

    fn role(&self) -> &'static str;

    fn phase_text(&self, phase: RoundPhase) -> String;

    fn on_scores(
        &mut self,
        scores: Vec<ScoreEntry>,
        num_top_players: Option<usize>,
        presenter: &mut dyn Presenter,
    );

    fn on_answer(&mut self, answer: String, presenter: &mut dyn Presenter);

    fn on_guesses(&mut self, guesses: Vec<GuessRecord>, presenter: &mut dyn Presenter) {
        let _ = (guesses, presenter);
        ignored(self.role(), "update_guesses");
    }

    fn on_message(&mut self, severity: Severity, message: String, presenter: &mut dyn Presenter) {
        presenter.notify(Notice::transient(severity.into(), message));
    }

    fn on_images(&mut self, images: Vec<ImageRef>, presenter: &mut dyn Presenter) {
        let _ = (images, presenter);
        ignored(self.role(), "add_images");
    }

    fn on_reject(&mut self, message: String, presenter: &mut dyn Presenter) {
        let _ = (message, presenter);
        ignored(self.role(), "reject_guess");
    }

    /// Apply a local user action, returning the command to send, if any.
    fn handle_action(
        &mut self,
        action: Self::Action,
        presenter: &mut dyn Presenter,
    ) -> Option<Self::Command>;
}

fn ignored(role: &str, tag: &str) {
    warn!(role, tag, "Ignoring message not meant for this role");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Disconnected,
}

/// All state of one client connection: the role driver, the presenter it
/// draws on, the local phase machine and whether the socket is still up.
pub struct Client<D, P> {
    driver: D,
    presenter: P,
    phase: PhaseMachine,
    state: ConnectionState,
}

impl<D: RoleDriver, P: Presenter> Client<D, P> {
    pub fn new(driver: D, presenter: P) -> Self {
        let mut client = Self {
            driver,
            presenter,
            phase: PhaseMachine::new(),
            state: ConnectionState::Open,
        };
        client.render_phase();
        client
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase.phase()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Decode and apply one inbound frame. Malformed frames are logged and
    /// leave everything untouched.
    pub fn handle_frame(&mut self, frame: &str) -> Countdown {
        if self.state == ConnectionState::Disconnected {
            warn!(role = self.driver.role(), "Dropping frame received after disconnect");
            return Countdown::Keep;
        }
        match codec::decode(frame) {
            Ok(event) => {
                debug!(role = self.driver.role(), tag = event.tag(), "Received message");
                self.handle_event(event)
            }
            Err(e) => {
                warn!(role = self.driver.role(), frame, "Unexpected socket reply: {}", e);
                Countdown::Keep
            }
        }
    }

    pub fn handle_event(&mut self, event: ServerEvent) -> Countdown {
        let presenter: &mut dyn Presenter = &mut self.presenter;
        match event {
            ServerEvent::UpdateState {
                phase,
                time_remaining,
            } => {
                let countdown = self.phase.apply(phase, time_remaining);
                self.render_phase();
                return countdown;
            }
            ServerEvent::UpdateScores {
                scores,
                num_top_players,
            } => self.driver.on_scores(scores, num_top_players, presenter),
            ServerEvent::UpdateGuesses { guesses } => self.driver.on_guesses(guesses, presenter),
            ServerEvent::ShowAnswer { answer } => self.driver.on_answer(answer, presenter),
            ServerEvent::ShowMessage { severity, message } => {
                self.driver.on_message(severity, message, presenter)
            }
            ServerEvent::AddImages { images } => self.driver.on_images(images, presenter),
            ServerEvent::RejectGuess { message } => self.driver.on_reject(message, presenter),
        }
        Countdown::Keep
    }

    /// One second of the local countdown has passed.
    pub fn tick(&mut self) -> Countdown {
        let countdown = self.phase.tick();
        self.render_phase();
        countdown
    }

    /// Apply a user action and encode the resulting command into a frame.
    /// After a disconnect every action is inert.
    pub fn handle_action(&mut self, action: D::Action) -> Option<String> {
        if self.state == ConnectionState::Disconnected {
            warn!(role = self.driver.role(), ?action, "Ignoring action, connection is closed");
            return None;
        }
        let command = self.driver.handle_action(action, &mut self.presenter)?;
        match codec::encode(&command) {
            Ok(frame) => Some(frame),
            Err(e) => {
                error!("Failed to serialize command: {}", e);
                None
            }
        }
    }

    /// The transport is gone. Terminal: nothing reconnects.
    pub fn handle_close(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        info!(role = self.driver.role(), "Connection closed");
        self.state = ConnectionState::Disconnected;
        self.presenter
            .notify(Notice::persistent(Tone::Critical, CONNECTION_LOST));
    }

    fn render_phase(&mut self) {
        let text = self.driver.phase_text(self.phase.phase());
        self.presenter.render_phase(&text);
    }
}
