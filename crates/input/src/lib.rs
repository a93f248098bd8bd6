//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks
//! the board cursor the actions move. Selecting the tile under the cursor is
//! left to the caller, which owns the engine.

pub mod cursor;
pub mod map;

pub use rhyme_mahjong_types as types;

pub use cursor::BoardCursor;
pub use map::{handle_key_event, should_quit};
