//! Inputs that drive [`crate::game::Game`].
//!
//! Events come from three places: the player (card clicks, level and mode
//! selectors), the repeating one-second clock, and conceal tasks coming due.

use crate::config::{DisplayMode, GridSize};

use super::turn::ConcealTask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Deal a fresh deck and reset the session.
    NewGame { grid: GridSize, mode: DisplayMode },

    /// Player clicked the card at this position.
    SelectCard(usize),

    /// Switch between pictures and numbers. Starts a new game.
    SetDisplayMode(DisplayMode),

    /// Switch level. Starts a new game.
    SetGridSize(GridSize),

    /// One second of play time passed.
    ClockTick,

    /// A mismatch conceal window elapsed.
    ConcealDue(ConcealTask),
}
