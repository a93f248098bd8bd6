//! Puzzle generation: curated vocabulary, custom text and the fallback chain.
//!
//! ```text
//! no custom text ──────────────▶ curated bank for the difficulty
//! custom text ──▶ validate ──✗─▶ InvalidText (no analyzer call)
//!                    │
//!                    ▼
//!                 analyzer ───✗─▶ curated easy bank (fallback_used)
//!                    │
//!                    ▼
//!         < 12 usable tiles ────▶ top up from curated easy to 24 tiles
//! ```
//!
//! Only a failure of the curated path itself (or of the layout) is returned
//! as an error.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use rhyme_mahjong_core::layout::capacity;
use rhyme_mahjong_core::{RandomSource, StackedLayoutGenerator};

use crate::analyzer::{AnalysisRequest, AnalysisResponse, TextAnalyzer};
use crate::error::GenerationError;
use crate::text::{classify_rhyme, derived_pattern, usable_words, validate_custom_text};
use crate::types::{
    Difficulty, GroupId, LayoutKind, PuzzleMetadata, PuzzleSource, RhymeGroup, RhymeMahjongPuzzle,
    MIN_USABLE_TILES, SUPPLEMENT_TARGET_TILES,
};
use crate::vocabulary::{bank, curated_groups, round_robin, slots_per_group, RhymeFamily};

/// Builds puzzles. Dependencies are injected so tests can pin the analyzer
/// and the random source.
pub struct PuzzleGenerationService<A, R> {
    analyzer: A,
    rng: R,
    layout: StackedLayoutGenerator,
    forced_layout: Option<LayoutKind>,
}

impl<A: TextAnalyzer, R: RandomSource> PuzzleGenerationService<A, R> {
    pub fn new(analyzer: A, rng: R) -> Self {
        Self {
            analyzer,
            rng,
            layout: StackedLayoutGenerator::default(),
            forced_layout: None,
        }
    }

    pub fn with_layout_generator(mut self, layout: StackedLayoutGenerator) -> Self {
        self.layout = layout;
        self
    }

    /// Always use `kind`, even when the puzzle does not fit it
    pub fn with_layout(mut self, kind: LayoutKind) -> Self {
        self.forced_layout = Some(kind);
        self
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Generate a puzzle from the curated bank, or from `custom_text` when given.
    pub async fn generate_puzzle(
        &mut self,
        difficulty: Difficulty,
        custom_text: Option<&str>,
    ) -> Result<RhymeMahjongPuzzle, GenerationError> {
        match custom_text {
            None => self.generate_curated(difficulty),
            Some(text) => self.generate_custom(difficulty, text).await,
        }
    }

    fn generate_curated(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<RhymeMahjongPuzzle, GenerationError> {
        let groups = curated_groups(difficulty, &mut self.rng)?;
        let metadata = PuzzleMetadata {
            source: PuzzleSource::Curated,
            ..PuzzleMetadata::default()
        };
        self.assemble(groups, difficulty, String::new(), metadata)
    }

    async fn generate_custom(
        &mut self,
        difficulty: Difficulty,
        raw: &str,
    ) -> Result<RhymeMahjongPuzzle, GenerationError> {
        let checked = validate_custom_text(raw)?;
        let request = AnalysisRequest {
            source_text: checked.text.clone(),
            difficulty,
            is_custom_text: true,
        };

        let response = match self.analyzer.analyze(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    error = %err,
                    difficulty = difficulty.as_str(),
                    "text analysis failed, using curated easy vocabulary"
                );
                let groups = curated_groups(Difficulty::Easy, &mut self.rng)?;
                let metadata = PuzzleMetadata {
                    source: PuzzleSource::Fallback,
                    fallback_used: true,
                    fallback_reason: Some(err.to_string()),
                    low_confidence: checked.low_confidence,
                    ..PuzzleMetadata::default()
                };
                return self.assemble(groups, Difficulty::Easy, checked.text, metadata);
            }
        };

        let mut groups = groups_from_analysis(&response, difficulty);
        let mut metadata = PuzzleMetadata {
            source: PuzzleSource::Custom,
            low_confidence: checked.low_confidence,
            ..PuzzleMetadata::default()
        };

        let usable = tile_total(&groups);
        if usable < MIN_USABLE_TILES {
            let added = supplement(&mut groups, &mut self.rng);
            warn!(
                usable_tiles = usable,
                added_tiles = added,
                "too few usable words from analysis, supplementing from curated vocabulary"
            );
            metadata.supplemented = true;
            metadata.supplement_count = added;
        }

        self.assemble(groups, difficulty, checked.text, metadata)
    }

    fn assemble(
        &mut self,
        groups: Vec<RhymeGroup>,
        difficulty: Difficulty,
        source_text: String,
        mut metadata: PuzzleMetadata,
    ) -> Result<RhymeMahjongPuzzle, GenerationError> {
        let kind = self.pick_layout(difficulty, tile_total(&groups));
        let mut puzzle = self
            .layout
            .generate_mahjong_layout(&groups, kind, &mut self.rng)?;

        metadata.difficulty = difficulty;
        metadata.group_count = puzzle.groups.len();
        metadata.total_words = puzzle.total_tiles;
        metadata.complexity = difficulty.complexity();
        puzzle.source_text = source_text;
        puzzle.metadata = metadata;

        info!(
            puzzle = %puzzle.id,
            difficulty = difficulty.as_str(),
            source = puzzle.metadata.source.as_str(),
            groups = puzzle.metadata.group_count,
            tiles = puzzle.total_tiles,
            layout = puzzle.layout.as_str(),
            fallback_used = puzzle.metadata.fallback_used,
            supplemented = puzzle.metadata.supplemented,
            "puzzle generated"
        );
        Ok(puzzle)
    }

    /// Smallest template that holds `tiles`, starting from the difficulty's own
    fn pick_layout(&self, difficulty: Difficulty, tiles: usize) -> LayoutKind {
        if let Some(kind) = self.forced_layout {
            return kind;
        }
        let mut kind = LayoutKind::for_difficulty(difficulty);
        while capacity(kind) < tiles {
            match kind.larger() {
                Some(next) => kind = next,
                None => break,
            }
        }
        kind
    }
}

fn tile_total(groups: &[RhymeGroup]) -> usize {
    groups.iter().map(RhymeGroup::tile_count).sum()
}

/// Turn analyzer groups into puzzle groups.
///
/// Words are filtered and deduplicated across the whole board: a word already
/// placed in an earlier group is skipped. Groups left with fewer than two words
/// are dropped. At most `group_count` groups of three word slots are kept.
/// Group letters follow the order of the surviving groups.
pub fn groups_from_analysis(response: &AnalysisResponse, difficulty: Difficulty) -> Vec<RhymeGroup> {
    let slots = slots_per_group(difficulty);
    let mut out: Vec<RhymeGroup> = Vec::new();
    let mut placed: HashSet<String> = HashSet::new();

    for group in &response.groups {
        if out.len() == difficulty.group_count() {
            break;
        }
        let mut words = usable_words(group.words.as_slice());
        words.retain(|w| !placed.contains(w));
        if words.len() < 2 {
            debug!(words = ?group.words, "dropping analyzed group with too few usable words");
            continue;
        }
        words.truncate(slots);
        placed.extend(words.iter().cloned());

        let pattern = group
            .pattern
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| derived_pattern(words.as_slice()));

        out.push(RhymeGroup {
            id: GroupId(out.len() as u16),
            pattern,
            rhyme_type: classify_rhyme(words.as_slice()),
            difficulty,
            significance: words.len() as f32 / slots as f32,
            words,
        });
    }
    out
}

/// Split `pairs` word slots into groups of at most `max` slots, none below two
fn supplement_chunks(pairs: usize, max: usize) -> Vec<usize> {
    let mut chunks = Vec::new();
    let mut left = pairs;
    while left > 0 {
        let take = if left > max && left - max < 2 {
            left - 2
        } else {
            left.min(max)
        };
        chunks.push(take);
        left -= take;
    }
    chunks.retain(|&c| c >= 2);
    chunks
}

/// Append curated easy groups until the puzzle has 24 tiles.
///
/// Words already on the board are not reused. Returns the number of tiles added.
fn supplement<R: RandomSource>(groups: &mut Vec<RhymeGroup>, rng: &mut R) -> usize {
    let needed_pairs = SUPPLEMENT_TARGET_TILES.saturating_sub(tile_total(groups)) / 2;
    let present: HashSet<String> = groups.iter().flat_map(|g| g.words.iter().cloned()).collect();

    let mut families: Vec<&RhymeFamily> = bank(Difficulty::Easy).iter().collect();
    rng.shuffle(&mut families);
    let mut families = families.into_iter();

    let mut added = 0;
    for slots in supplement_chunks(needed_pairs, slots_per_group(Difficulty::Easy)) {
        let next = families.by_ref().find_map(|f| {
            let fresh: Vec<&str> = f
                .words
                .iter()
                .copied()
                .filter(|w| !present.contains(*w))
                .collect();
            (fresh.len() >= 2).then_some((f, fresh))
        });
        let Some((family, mut fresh)) = next else {
            break;
        };
        rng.shuffle(&mut fresh);

        groups.push(RhymeGroup {
            id: GroupId(groups.len() as u16),
            pattern: family.pattern.to_string(),
            words: round_robin(&fresh, slots),
            rhyme_type: family.rhyme_type,
            difficulty: Difficulty::Easy,
            significance: family.significance,
        });
        added += slots * 2;
    }
    added
}
