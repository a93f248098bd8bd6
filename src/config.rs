//! Session configuration from `RHYME_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::types::{Difficulty, LayoutKind};

/// What to play and where to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub seed: u32,
    /// File whose contents are used as custom text
    pub text_path: Option<PathBuf>,
    /// Forced template; `None` picks one per difficulty
    pub layout: Option<LayoutKind>,
    pub log_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            seed: 1,
            text_path: None,
            layout: None,
            log_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup. Unparseable values fall back
    /// to defaults; a missing seed is derived from the wall clock.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let difficulty = get("RHYME_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or(Difficulty::Easy);

        let seed = get("RHYME_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        Self {
            difficulty,
            seed,
            text_path: get("RHYME_TEXT_PATH").map(PathBuf::from),
            layout: get("RHYME_LAYOUT").and_then(|s| LayoutKind::from_str(&s)),
            log_path: get("RHYME_LOG_PATH").map(PathBuf::from),
        }
    }

    /// Custom text to analyze, read from `text_path` when set
    pub fn custom_text(&self) -> Result<Option<String>> {
        let Some(path) = &self.text_path else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read custom text from {}", path.display()))?;
        Ok(Some(text))
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
