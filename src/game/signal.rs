//! Outputs of [`crate::game::Game`].
//!
//! [`Signal`]s describe what changed and are meant for the presentation
//! layer. [`Command`]s ask the runtime to arm or disarm timers.

use std::time::Duration;

use crate::config::{DisplayMode, GridSize};

use super::deck::CardFace;
use super::turn::ConcealTask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// A new deck was dealt; every card is face-down.
    BoardReset {
        grid: GridSize,
        mode: DisplayMode,
        epoch: u64,
    },

    /// A card was turned face-up.
    Flip { position: usize, face: CardFace },

    Match { first: usize, second: usize },

    /// Two different faces are showing and will be turned back.
    Mismatch { first: usize, second: usize },

    /// A mismatched pair was turned face-down again.
    Conceal { first: usize, second: usize },

    SessionUpdated { moves: u32, elapsed_secs: u32 },

    /// The last pair was matched.
    Completed { moves: u32, elapsed_secs: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Deliver [`super::GameEvent::ConcealDue`] once after `delay`.
    ScheduleConceal { task: ConcealTask, delay: Duration },

    /// Deliver [`super::GameEvent::ClockTick`] every `interval`.
    StartClock { interval: Duration },

    StopClock,
}

/// Everything one event produced, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub signals: Vec<Signal>,
    pub commands: Vec<Command>,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.commands.is_empty()
    }

    pub(crate) fn signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub(crate) fn command(&mut self, command: Command) {
        self.commands.push(command);
    }
}
