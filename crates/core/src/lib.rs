//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the board geometry, the matching rules and the session
//! state machine. It has **no dependencies** on UI, networking, or I/O:
//! randomness is injected through [`RandomSource`] and time only moves when a
//! front end calls [`RhymeMatchingEngine::tick`].
//!
//! # Module Structure
//!
//! - [`layout`]: stacked layout templates and tile placement
//! - [`exposure`]: which tiles are covered by higher layers
//! - [`engine`]: selection, matching, hints and session state
//! - [`scheduler`]: deferred removals on a virtual clock
//! - [`scoring`]: match validation, points, star rating
//! - [`rng`]: seedable random source and shuffling
//! - [`snapshot`]: read-only session summary for front ends
//!
//! # Rules
//!
//! - Two tiles match when they belong to the same rhyme group.
//! - Only exposed tiles can be selected. A tile is exposed when no live tile
//!   on a higher layer overlaps it (one cell of tolerance in each axis).
//! - Exact matches score 100, slant matches 75, each hint costs 50.
//! - Matched tiles leave the board 300ms after the match is accepted.
//!
//! # Example
//!
//! ```
//! use rhyme_mahjong_core::{RhymeMatchingEngine, SimpleRng, StackedLayoutGenerator};
//! use rhyme_mahjong_core::types::{Difficulty, GroupId, LayoutKind, RhymeGroup, RhymeType};
//!
//! let group = RhymeGroup {
//!     id: GroupId(0),
//!     pattern: "-ay".to_string(),
//!     words: vec!["day".to_string(), "play".to_string()],
//!     rhyme_type: RhymeType::Exact,
//!     difficulty: Difficulty::Easy,
//!     significance: 1.0,
//! };
//!
//! let mut rng = SimpleRng::new(7);
//! let puzzle = StackedLayoutGenerator::default()
//!     .generate_mahjong_layout(&[group], LayoutKind::Simple, &mut rng)
//!     .unwrap();
//! assert_eq!(puzzle.total_tiles, 4);
//!
//! let mut engine = RhymeMatchingEngine::new(puzzle);
//! let (a, b) = StackedLayoutGenerator::available_pairs(engine.tiles())[0];
//! engine.select_tile(a).unwrap();
//! engine.select_tile(b).unwrap();
//! engine.tick(300);
//!
//! assert_eq!(engine.game_stats().remaining_tiles, 2);
//! assert_eq!(engine.game_stats().current_score, 100);
//! ```

pub mod engine;
pub mod exposure;
pub mod layout;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use rhyme_mahjong_types as types;

// Re-export commonly used types for convenience
pub use engine::{GameState, Hint, HintKind, RhymeMatchingEngine, SelectError, SelectOutcome};
pub use layout::{LayoutConfig, LayoutError, StackedLayoutGenerator};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use scheduler::{ScheduledEvent, Scheduler};
pub use scoring::{calculate_progress, calculate_star_rating, validate_match, MatchResult};
pub use snapshot::GameStats;
