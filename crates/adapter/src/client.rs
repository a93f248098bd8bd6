//! HTTP client for the text-analysis endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use rhyme_mahjong_generator::{AnalysisError, AnalysisRequest, AnalysisResponse, TextAnalyzer};

use crate::config::AnalyzerConfig;
use crate::protocol::{parse_response, AnalyzeRequestBody};

/// Posts analysis requests as JSON. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpTextAnalyzer {
    client: Client,
    endpoint: Url,
    health: Url,
}

impl HttpTextAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let endpoint = Url::parse(&config.url).map_err(|e| {
            AnalysisError::Transport(format!("invalid analyzer url {:?}: {}", config.url, e))
        })?;
        let health = endpoint
            .join("/health")
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            health,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// `GET /health` on the endpoint's host; true on any 2xx
    pub async fn health(&self) -> bool {
        match self.client.get(self.health.clone()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, url = %self.health, "analyzer health check failed");
                false
            }
        }
    }
}

#[async_trait]
impl TextAnalyzer for HttpTextAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        let body = AnalyzeRequestBody::from(request);
        debug!(
            url = %self.endpoint,
            difficulty = body.difficulty,
            chars = request.source_text.len(),
            "sending analysis request"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let response = parse_response(&bytes)?;
        debug!(groups = response.groups.len(), "analysis received");
        Ok(response)
    }
}
