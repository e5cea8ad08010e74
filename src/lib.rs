//! Memory Match: a card-pairs game.
//!
//! The core ([`game`]) is a small event-driven state machine: a shuffled
//! deck of paired faces, a turn machine that allows two face-up cards at a
//! time, and a session tracker counting moves and seconds. [`runtime`]
//! connects it to a timer source. The GTK front end lives in `ui` behind the
//! `gui` feature.

pub mod config;
pub mod error;
pub mod game;
pub mod runtime;

#[cfg(feature = "gui")]
pub mod ui;

pub use config::{DisplayMode, GameConfig, GridSize, Level, Preferences, Theme, Timing};
pub use error::{ConfigError, PreferencesError};
pub use game::{Game, GameEvent, Signal};
pub use runtime::{ManualScheduler, Runtime, Scheduler};
