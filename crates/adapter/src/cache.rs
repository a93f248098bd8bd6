//! LRU cache in front of any analyzer
//!
//! Keyed by difficulty and trimmed source text. Only successful analyses are
//! stored, so a transient backend failure is retried on the next request.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use rhyme_mahjong_generator::types::Difficulty;
use rhyme_mahjong_generator::{AnalysisError, AnalysisRequest, AnalysisResponse, TextAnalyzer};

type CacheKey = (Difficulty, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct CachingAnalyzer<A> {
    inner: A,
    /// `None` when capacity is zero
    cache: Option<Mutex<LruCache<CacheKey, AnalysisResponse>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<A: TextAnalyzer> CachingAnalyzer<A> {
    pub fn new(inner: A, capacity: usize) -> Self {
        Self {
            inner,
            cache: NonZeroUsize::new(capacity).map(|c| Mutex::new(LruCache::new(c))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.as_ref().map_or(0, |c| c.lock().len()),
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }
}

#[async_trait]
impl<A: TextAnalyzer> TextAnalyzer for CachingAnalyzer<A> {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        let key: CacheKey = (request.difficulty, request.source_text.trim().to_string());

        if let Some(cache) = &self.cache {
            let cached = {
                let mut guard = cache.lock();
                guard.get(&key).cloned()
            };
            if let Some(response) = cached {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(difficulty = key.0.as_str(), "analysis cache hit");
                return Ok(response);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let response = self.inner.analyze(request).await?;
        if let Some(cache) = &self.cache {
            cache.lock().put(key, response.clone());
        }
        Ok(response)
    }
}
