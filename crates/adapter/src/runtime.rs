//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async analyzer client.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use rhyme_mahjong_generator::{DisabledAnalyzer, TextAnalyzer};

use crate::cache::CachingAnalyzer;
use crate::client::HttpTextAnalyzer;
use crate::config::AnalyzerConfig;

/// Running analyzer instance: a tokio runtime plus the analyzer stack
/// selected by [`AnalyzerConfig`].
pub struct AnalyzerRuntime {
    rt: Runtime,
    analyzer: Arc<dyn TextAnalyzer>,
    http: Option<Arc<HttpTextAnalyzer>>,
}

impl AnalyzerRuntime {
    /// Start from `RHYME_ANALYZER_*` environment variables.
    pub fn start_from_env() -> anyhow::Result<Self> {
        Self::start(&AnalyzerConfig::from_env())
    }

    pub fn start(config: &AnalyzerConfig) -> anyhow::Result<Self> {
        let rt = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        if config.disabled {
            info!("text analyzer disabled");
            return Ok(Self {
                rt,
                analyzer: Arc::new(DisabledAnalyzer),
                http: None,
            });
        }

        let http = Arc::new(HttpTextAnalyzer::new(config)?);
        let analyzer: Arc<dyn TextAnalyzer> = if config.cache_capacity > 0 {
            Arc::new(CachingAnalyzer::new(http.clone(), config.cache_capacity))
        } else {
            http.clone()
        };
        info!(
            url = http.endpoint(),
            timeout_ms = config.timeout_ms,
            cache_capacity = config.cache_capacity,
            "text analyzer configured"
        );

        Ok(Self {
            rt,
            analyzer,
            http: Some(http),
        })
    }

    /// Shared handle to the analyzer stack
    pub fn analyzer(&self) -> Arc<dyn TextAnalyzer> {
        self.analyzer.clone()
    }

    /// Run a future to completion on the adapter runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.rt.block_on(future)
    }

    /// Probe the endpoint. `None` when the analyzer is disabled.
    pub fn health(&self) -> Option<bool> {
        let http = self.http.as_ref()?;
        Some(self.rt.block_on(http.health()))
    }
}
