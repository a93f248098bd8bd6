//! Rhyme Mahjong (workspace facade crate).
//!
//! Re-exports the member crates under short names and adds the pieces the
//! terminal binary needs: environment configuration, tracing setup and a
//! play session that maps input actions onto the matching engine.

pub use rhyme_mahjong_adapter as adapter;
pub use rhyme_mahjong_core as core;
pub use rhyme_mahjong_generator as generator;
pub use rhyme_mahjong_input as input;
pub use rhyme_mahjong_term as term;
pub use rhyme_mahjong_types as types;

pub mod config;
pub mod logging;
pub mod session;

pub use config::SessionConfig;
pub use session::PlaySession;
