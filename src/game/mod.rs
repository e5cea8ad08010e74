//! The game core: board generation, the turn state machine and the session
//! tracker, tied together by [`Game`].

mod deck;
mod engine;
mod event;
mod session;
mod signal;
mod turn;

pub use deck::{
    BoardGenerator, Card, CardFace, CardState, Deck, IMAGE_FACE_COUNT, NUMBER_FACE_COUNT,
    face_pool,
};
pub use engine::{Game, GameState};
pub use event::GameEvent;
pub use session::Session;
pub use signal::{Command, Reaction, Signal};
pub use turn::{ConcealTask, TurnMachine, TurnPhase};
