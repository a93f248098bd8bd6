//! Adapter module - the external text-analysis collaborator over HTTP
//!
//! Custom-text puzzles ask an analysis endpoint to group the words of the text
//! by rhyme. This crate provides the [`TextAnalyzer`](rhyme_mahjong_generator::TextAnalyzer)
//! implementations used outside of tests.
//!
//! # Stack
//!
//! ```text
//! AnalyzerRuntime (tokio current-thread, block_on from the game loop)
//!   └─ CachingAnalyzer (LRU keyed by difficulty + trimmed text)
//!        └─ HttpTextAnalyzer (reqwest, JSON, one attempt per call)
//! ```
//!
//! # Failure Mapping
//!
//! | Condition | Error |
//! |-----------|-------|
//! | connect error, timeout, broken body | `AnalysisError::Transport` |
//! | non-2xx status | `AnalysisError::Status(code)` |
//! | body does not match the schema | `AnalysisError::Malformed` |
//! | `RHYME_ANALYZER_DISABLED` set | `AnalysisError::Disabled` |
//!
//! Every one of these makes the generator fall back to curated vocabulary.
//!
//! # Environment Variables
//!
//! - `RHYME_ANALYZER_URL`: endpoint (default: "http://127.0.0.1:8080/api/puzzle")
//! - `RHYME_ANALYZER_TIMEOUT_MS`: request timeout (default: 8000)
//! - `RHYME_ANALYZER_CACHE`: LRU capacity, 0 disables the cache (default: 1000)
//! - `RHYME_ANALYZER_DISABLED`: set to "1" or "true" to skip the endpoint entirely
//!
//! See [`protocol`] for the wire format.

pub mod cache;
pub mod client;
pub mod config;
pub mod protocol;
pub mod runtime;

pub use rhyme_mahjong_generator as generator;
pub use rhyme_mahjong_types as types;

pub use cache::{CacheStats, CachingAnalyzer};
pub use client::HttpTextAnalyzer;
pub use config::AnalyzerConfig;
pub use protocol::parse_response;
pub use runtime::AnalyzerRuntime;
