//! Text analysis seam
//!
//! Custom-text generation asks an external analyzer to group the words of the
//! text by rhyme. The service only sees this trait; the HTTP client lives in
//! the adapter crate and tests supply in-memory analyzers.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Difficulty;

/// What the analyzer is asked to do
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisRequest {
    pub source_text: String,
    pub difficulty: Difficulty,
    pub is_custom_text: bool,
}

/// One rhyme group as reported by the analyzer, before filtering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyzedGroup {
    pub words: Vec<String>,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResponse {
    pub groups: Vec<AnalyzedGroup>,
}

/// Any of these sends generation down the curated fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("analyzer unreachable: {0}")]
    Transport(String),
    #[error("analyzer returned HTTP {0}")]
    Status(u16),
    #[error("analyzer response malformed: {0}")]
    Malformed(String),
    #[error("analyzer disabled")]
    Disabled,
}

#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Analyze once. Implementations must not retry.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError>;
}

#[async_trait]
impl<T: TextAnalyzer + ?Sized> TextAnalyzer for Arc<T> {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        (**self).analyze(request).await
    }
}

/// Analyzer for sessions without a backend: every call fails with `Disabled`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAnalyzer;

#[async_trait]
impl TextAnalyzer for DisabledAnalyzer {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        Err(AnalysisError::Disabled)
    }
}
