use crate::protocol::PhaseName;

/// Local view of the round phase. The server stays authoritative; this only
/// keeps the remaining-seconds display moving between pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Playing { remaining: u32 },
    Waiting,
}

/// What the owner of the countdown timer has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Drop any running countdown and start a fresh one-second countdown.
    Restart,
    /// Drop any running countdown.
    Cancel,
    /// Leave the timer alone.
    Keep,
}

#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: RoundPhase,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Waiting,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Apply an `update_state` push.
    pub fn apply(&mut self, phase: PhaseName, time_remaining: Option<i64>) -> Countdown {
        match (phase, time_remaining) {
            (PhaseName::Play, Some(seconds)) if seconds > 0 => {
                let remaining = u32::try_from(seconds).unwrap_or(u32::MAX);
                self.phase = RoundPhase::Playing { remaining };
                Countdown::Restart
            }
            _ => {
                self.phase = RoundPhase::Waiting;
                Countdown::Cancel
            }
        }
    }

    /// One local second has elapsed.
    pub fn tick(&mut self) -> Countdown {
        match self.phase {
            RoundPhase::Playing { remaining } if remaining > 1 => {
                self.phase = RoundPhase::Playing {
                    remaining: remaining - 1,
                };
                Countdown::Keep
            }
            RoundPhase::Playing { .. } => {
                self.phase = RoundPhase::Waiting;
                Countdown::Cancel
            }
            RoundPhase::Waiting => Countdown::Cancel,
        }
    }
}
