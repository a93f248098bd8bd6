use rhyme_mahjong_core::LayoutError;
use thiserror::Error;

use crate::types::Difficulty;

/// Hard failures of puzzle generation.
///
/// Analyzer failures never show up here: they are recovered by the curated
/// fallback inside the service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Custom text rejected before any analyzer call
    #[error("invalid custom text: {reason}")]
    InvalidText { reason: String },

    #[error("curated vocabulary has too few rhyme families for {} puzzles", .0.as_str())]
    VocabularyExhausted(Difficulty),

    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
}

impl GenerationError {
    pub(crate) fn invalid_text(reason: impl Into<String>) -> Self {
        GenerationError::InvalidText {
            reason: reason.into(),
        }
    }
}
