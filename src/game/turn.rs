//! Per-turn selection: at most two face-up cards, compared on the second flip.
//!
//! ```text
//! Idle --flip--> OneSelected --flip--> Evaluating --equal-----> Idle
//!                                                 --different-> Concealing --conceal--> Idle
//! ```

use super::deck::{CardState, Deck};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    OneSelected { first: usize },
    /// Only held while the two faces are being compared.
    Evaluating { first: usize, second: usize },
    /// A mismatched pair waits for its [`ConcealTask`].
    Concealing { first: usize, second: usize },
}

impl TurnPhase {
    /// New flips are refused while busy.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            TurnPhase::Evaluating { .. } | TurnPhase::Concealing { .. }
        )
    }

    /// Positions revealed this turn and not yet resolved.
    pub fn pending(self) -> Vec<usize> {
        match self {
            TurnPhase::Idle => Vec::new(),
            TurnPhase::OneSelected { first } => vec![first],
            TurnPhase::Evaluating { first, second } | TurnPhase::Concealing { first, second } => {
                vec![first, second]
            }
        }
    }
}

/// Scheduled reversal of one mismatched pair.
///
/// `epoch` identifies the game that scheduled it; a task from an earlier
/// game is ignored when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConcealTask {
    pub epoch: u64,
    pub first: usize,
    pub second: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnOutcome {
    Rejected,
    Flipped,
    Matched { first: usize, second: usize },
    Mismatched(ConcealTask),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnMachine {
    phase: TurnPhase,
}

impl TurnMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub(crate) fn select(&mut self, deck: &mut Deck, position: usize, epoch: u64) -> TurnOutcome {
        let first = match self.phase {
            TurnPhase::Idle => None,
            TurnPhase::OneSelected { first } => Some(first),
            TurnPhase::Evaluating { .. } | TurnPhase::Concealing { .. } => {
                return TurnOutcome::Rejected;
            }
        };
        if deck.state(position) != Some(CardState::Hidden) {
            return TurnOutcome::Rejected;
        }

        deck.set_state(position, CardState::Revealed);

        let Some(first) = first else {
            self.phase = TurnPhase::OneSelected { first: position };
            return TurnOutcome::Flipped;
        };

        let second = position;
        self.phase = TurnPhase::Evaluating { first, second };
        if deck.face(first) == deck.face(second) {
            deck.set_state(first, CardState::Matched);
            deck.set_state(second, CardState::Matched);
            self.phase = TurnPhase::Idle;
            TurnOutcome::Matched { first, second }
        } else {
            self.phase = TurnPhase::Concealing { first, second };
            TurnOutcome::Mismatched(ConcealTask {
                epoch,
                first,
                second,
            })
        }
    }

    /// Flips the pending pair back. Returns `false` if `task` is not the
    /// pair currently waiting.
    pub(crate) fn conceal(&mut self, deck: &mut Deck, task: &ConcealTask) -> bool {
        match self.phase {
            TurnPhase::Concealing { first, second }
                if first == task.first && second == task.second =>
            {
                deck.set_state(first, CardState::Hidden);
                deck.set_state(second, CardState::Hidden);
                self.phase = TurnPhase::Idle;
                true
            }
            _ => false,
        }
    }
}
