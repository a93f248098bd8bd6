//! Terminal board renderer.
//!
//! The board is drawn into a [`FrameBuffer`] of styled character cells by a
//! pure view ([`BoardView`]) and flushed to the terminal by
//! [`TerminalRenderer`], which only rewrites rows that changed.
//!
//! The view reads the engine's tiles and its [`GameStats`](core::GameStats);
//! it never mutates session state.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use rhyme_mahjong_core as core;
pub use rhyme_mahjong_types as types;

pub use board_view::{BoardView, ViewState};
pub use fb::{Cell, FrameBuffer, Rgb, Style};
pub use renderer::{encode_frame_into, TerminalRenderer};
