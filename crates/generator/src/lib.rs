//! Puzzle generation - rhyme groups from curated vocabulary or custom text
//!
//! [`PuzzleGenerationService`] is the single entry point. It turns a
//! difficulty (and optionally a piece of user text) into a laid-out
//! [`RhymeMahjongPuzzle`](types::RhymeMahjongPuzzle).
//!
//! # Module Structure
//!
//! - [`vocabulary`]: curated rhyme families per difficulty
//! - [`text`]: custom text validation and word filtering
//! - [`analyzer`]: the [`TextAnalyzer`] seam for external text analysis
//! - [`service`]: generation paths, fallback and supplementation
//!
//! # Example
//!
//! ```
//! use rhyme_mahjong_core::SimpleRng;
//! use rhyme_mahjong_generator::{DisabledAnalyzer, PuzzleGenerationService};
//! use rhyme_mahjong_generator::types::Difficulty;
//!
//! let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(42));
//! let puzzle = block_on(service.generate_puzzle(Difficulty::Medium, None)).unwrap();
//! assert_eq!(puzzle.total_tiles, 30);
//! # fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod analyzer;
pub mod error;
pub mod service;
pub mod text;
pub mod vocabulary;

pub use rhyme_mahjong_core as core;
pub use rhyme_mahjong_types as types;

pub use analyzer::{
    AnalysisError, AnalysisRequest, AnalysisResponse, AnalyzedGroup, DisabledAnalyzer,
    TextAnalyzer,
};
pub use error::GenerationError;
pub use service::{groups_from_analysis, PuzzleGenerationService};
pub use text::{validate_custom_text, CheckedText};
