//! Puzzle generation scenarios through the facade

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use rhyme_mahjong::core::{LayoutConfig, SimpleRng, StackedLayoutGenerator};
use rhyme_mahjong::generator::{
    AnalysisError, AnalysisRequest, AnalysisResponse, AnalyzedGroup, DisabledAnalyzer,
    GenerationError, PuzzleGenerationService, TextAnalyzer,
};
use rhyme_mahjong::types::{
    Complexity, Difficulty, LayoutKind, PuzzleSource, TilePosition, VisualPosition,
};

const POEM: &str = "Bright light in the night, a kite takes flight; \
                    rain on the plain, a train in the lane.";

/// Analyzer that returns a fixed result and counts calls
struct Canned {
    result: Result<AnalysisResponse, AnalysisError>,
    calls: AtomicUsize,
}

impl Canned {
    fn new(result: Result<AnalysisResponse, AnalysisError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    fn groups(groups: &[&[&str]]) -> Arc<Self> {
        Self::new(Ok(AnalysisResponse {
            groups: groups
                .iter()
                .map(|words| AnalyzedGroup {
                    words: words.iter().map(|w| w.to_string()).collect(),
                    pattern: None,
                })
                .collect(),
        }))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextAnalyzer for Canned {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[test]
fn test_curated_easy_metadata() {
    let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(7));
    let puzzle = tokio_test::block_on(service.generate_puzzle(Difficulty::Easy, None)).unwrap();

    assert_eq!(puzzle.metadata.group_count, 4);
    assert_eq!(puzzle.metadata.total_words, 24);
    assert_eq!(puzzle.metadata.complexity, Complexity::Simple);
    assert_eq!(puzzle.metadata.source, PuzzleSource::Curated);
    assert_eq!(puzzle.layout, LayoutKind::Simple);
}

#[tokio::test]
async fn test_curated_tile_counts_per_difficulty() {
    for (difficulty, tiles, layout) in [
        (Difficulty::Easy, 24, LayoutKind::Simple),
        (Difficulty::Medium, 30, LayoutKind::Pyramid),
        (Difficulty::Hard, 36, LayoutKind::Turtle),
    ] {
        let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(99));
        let puzzle = service.generate_puzzle(difficulty, None).await.unwrap();

        assert_eq!(puzzle.total_tiles, tiles, "{:?}", difficulty);
        assert_eq!(puzzle.total_tiles, puzzle.metadata.group_count * 6);
        assert_eq!(puzzle.tiles.len(), puzzle.total_tiles);
        assert_eq!(puzzle.layout, layout);
    }
}

#[tokio::test]
async fn test_short_text_fails_before_analysis() {
    let analyzer = Canned::groups(&[&["light", "night"]]);
    let mut service = PuzzleGenerationService::new(analyzer.clone(), SimpleRng::new(1));

    let err = service
        .generate_puzzle(Difficulty::Hard, Some("short"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::InvalidText { .. }));
    assert_eq!(analyzer.calls(), 0);
}

#[tokio::test]
async fn test_thin_analysis_is_supplemented() {
    // 4 usable words, 8 tiles
    let analyzer = Canned::groups(&[&["light", "night", "the"], &["rain", "plain", "a"]]);
    let mut service = PuzzleGenerationService::new(analyzer.clone(), SimpleRng::new(3));

    let puzzle = service
        .generate_puzzle(Difficulty::Medium, Some(POEM))
        .await
        .unwrap();

    assert_eq!(analyzer.calls(), 1);
    assert!(puzzle.metadata.supplemented);
    assert!(puzzle.total_tiles >= 20);
    assert_eq!(puzzle.total_tiles, 24);
    assert_eq!(puzzle.metadata.supplement_count, 16);
    assert_eq!(puzzle.metadata.source, PuzzleSource::Custom);
    assert_eq!(puzzle.source_text, POEM.trim());

    let words: Vec<&str> = puzzle.tiles.iter().map(|t| t.word.as_str()).collect();
    assert!(words.contains(&"light"));
    assert!(words.contains(&"plain"));
    assert!(!words.contains(&"the"));
}

#[tokio::test]
async fn test_analyzer_failure_falls_back_to_curated_easy() {
    let analyzer = Canned::new(Err(AnalysisError::Status(503)));
    let mut service = PuzzleGenerationService::new(analyzer.clone(), SimpleRng::new(5));

    let puzzle = service
        .generate_puzzle(Difficulty::Hard, Some(POEM))
        .await
        .unwrap();

    assert_eq!(analyzer.calls(), 1);
    assert!(puzzle.metadata.fallback_used);
    assert_eq!(puzzle.metadata.source, PuzzleSource::Fallback);
    assert_eq!(puzzle.metadata.difficulty, Difficulty::Easy);
    assert_eq!(puzzle.total_tiles, 24);
    assert!(puzzle
        .metadata
        .fallback_reason
        .as_deref()
        .is_some_and(|r| r.contains("503")));
}

#[tokio::test]
async fn test_same_seed_same_puzzle() {
    let make = || PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(2024));
    let a = make().generate_puzzle(Difficulty::Hard, None).await.unwrap();
    let b = make().generate_puzzle(Difficulty::Hard, None).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_injected_layout_geometry_and_forced_template() {
    let config = LayoutConfig {
        layer_offset: VisualPosition { x: 0, y: 0, z: 20 },
        ..LayoutConfig::default()
    };
    let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(8))
        .with_layout_generator(StackedLayoutGenerator::new(config))
        .with_layout(LayoutKind::Turtle);

    let puzzle = service.generate_puzzle(Difficulty::Easy, None).await.unwrap();
    assert_eq!(puzzle.layout, LayoutKind::Turtle);

    let geometry = StackedLayoutGenerator::new(config);
    for tile in &puzzle.tiles {
        assert_eq!(tile.visual, geometry.visual_position(tile.position, puzzle.grid));
        assert_eq!(tile.visual.z, tile.position.layer as i32 * 20);
    }
    let corner = geometry.visual_position(TilePosition::new(0, 0, 0), puzzle.grid);
    assert_eq!(
        geometry.get_tile_transform(&puzzle.tiles[0], puzzle.grid),
        format!(
            "translate3d({}px, {}px, {}px)",
            corner.x + puzzle.tiles[0].position.col as i32 * 64,
            corner.y + puzzle.tiles[0].position.row as i32 * 84,
            puzzle.tiles[0].position.layer as i32 * 20
        )
    );
}

#[tokio::test]
async fn test_word_shared_by_two_analyzed_groups_is_placed_once() {
    let analyzer = Canned::groups(&[&["light", "night", "sight"], &["night", "bright", "flight"]]);
    let mut service = PuzzleGenerationService::new(analyzer, SimpleRng::new(21));

    let puzzle = service
        .generate_puzzle(Difficulty::Medium, Some(POEM))
        .await
        .unwrap();

    assert_eq!(puzzle.groups[1].words, vec!["bright", "flight"]);
    assert_eq!(puzzle.tiles.iter().filter(|t| t.word == "night").count(), 2);
    for tile in &puzzle.tiles {
        let copies: Vec<_> = puzzle.tiles.iter().filter(|t| t.word == tile.word).collect();
        assert_eq!(copies.len() % 2, 0, "{}", tile.word);
        assert!(copies.iter().all(|t| t.rhyme_group == tile.rhyme_group));
    }
}
