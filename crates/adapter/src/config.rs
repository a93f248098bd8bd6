use std::env;

/// Text-analysis client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Endpoint receiving analysis requests
    pub url: String,
    pub timeout_ms: u64,
    /// LRU capacity for analysis responses; 0 disables caching
    pub cache_capacity: usize,
    /// Never contact the endpoint; every analysis fails immediately
    pub disabled: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080/api/puzzle".to_string(),
            timeout_ms: 8000,
            cache_capacity: 1000,
            disabled: false,
        }
    }
}

impl AnalyzerConfig {
    /// Create from `RHYME_ANALYZER_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let url = env::var("RHYME_ANALYZER_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.url);

        let timeout_ms = env::var("RHYME_ANALYZER_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.timeout_ms);

        let cache_capacity = env::var("RHYME_ANALYZER_CACHE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.cache_capacity);

        Self {
            url,
            timeout_ms,
            cache_capacity,
            disabled: Self::is_disabled(),
        }
    }

    /// Check if the analyzer is disabled via environment
    pub fn is_disabled() -> bool {
        env::var("RHYME_ANALYZER_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_endpoint() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8080/api/puzzle");
        assert_eq!(config.timeout_ms, 8000);
        assert_eq!(config.cache_capacity, 1000);
        assert!(!config.disabled);
    }

    #[test]
    fn from_env_always_yields_a_usable_config() {
        let config = AnalyzerConfig::from_env();
        assert!(!config.url.is_empty());
    }
}
