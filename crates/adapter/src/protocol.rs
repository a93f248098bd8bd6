//! Protocol module - JSON bodies exchanged with the text-analysis endpoint
//!
//! Request:
//!
//! ```json
//! {"sourceText": "...", "difficulty": "medium", "isCustomText": true}
//! ```
//!
//! Response (only the fields used here; anything else is ignored):
//!
//! ```json
//! {"puzzle": {"rhymeGroups": [{"words": ["light", "night"], "pattern": "-ight"}]}}
//! ```

use serde::{Deserialize, Serialize};

use rhyme_mahjong_generator::{AnalysisError, AnalysisRequest, AnalysisResponse, AnalyzedGroup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequestBody<'a> {
    pub source_text: &'a str,
    pub difficulty: &'static str,
    pub is_custom_text: bool,
}

impl<'a> From<&'a AnalysisRequest> for AnalyzeRequestBody<'a> {
    fn from(request: &'a AnalysisRequest) -> Self {
        Self {
            source_text: &request.source_text,
            difficulty: request.difficulty.as_str(),
            is_custom_text: request.is_custom_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyzeResponseBody {
    pub puzzle: PuzzlePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzlePayload {
    pub rhyme_groups: Vec<RhymeGroupPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RhymeGroupPayload {
    pub words: Vec<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub phonetic_pattern: Option<String>,
}

impl From<AnalyzeResponseBody> for AnalysisResponse {
    fn from(body: AnalyzeResponseBody) -> Self {
        AnalysisResponse {
            groups: body
                .puzzle
                .rhyme_groups
                .into_iter()
                .map(|g| AnalyzedGroup {
                    words: g.words,
                    pattern: g.pattern.or(g.phonetic_pattern),
                })
                .collect(),
        }
    }
}

/// Decode a response body. Anything that does not match the schema is `Malformed`.
pub fn parse_response(body: &[u8]) -> Result<AnalysisResponse, AnalysisError> {
    serde_json::from_slice::<AnalyzeResponseBody>(body)
        .map(AnalysisResponse::from)
        .map_err(|e| AnalysisError::Malformed(e.to_string()))
}
