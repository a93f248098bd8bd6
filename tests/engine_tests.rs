//! Integration tests for the matching engine

use rhyme_mahjong::core::{
    HintKind, RhymeMatchingEngine, SelectError, SelectOutcome, SequenceRng, SimpleRng,
    StackedLayoutGenerator,
};
use rhyme_mahjong::generator::{DisabledAnalyzer, PuzzleGenerationService};
use rhyme_mahjong::types::{
    Difficulty, GridDimensions, GroupId, LayoutKind, PuzzleMetadata, RhymeMahjongPuzzle,
    RhymeTile, RhymeType, TileId, TilePosition, HINT_COST, REMOVAL_DELAY_MS,
};

fn tile(id: TileId, word: &str, group: u16, pos: (u8, u8, u8)) -> RhymeTile {
    RhymeTile::new(
        id,
        word,
        GroupId(group),
        RhymeType::Exact,
        TilePosition::new(pos.0, pos.1, pos.2),
    )
}

fn puzzle(tiles: Vec<RhymeTile>) -> RhymeMahjongPuzzle {
    let total_tiles = tiles.len();
    RhymeMahjongPuzzle {
        id: "integration".to_string(),
        source_text: String::new(),
        tiles,
        groups: Vec::new(),
        grid: GridDimensions {
            width: 8,
            height: 4,
            layers: 2,
        },
        total_tiles,
        layout: LayoutKind::Simple,
        metadata: PuzzleMetadata::default(),
    }
}

fn curated(difficulty: Difficulty) -> RhymeMahjongPuzzle {
    let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SequenceRng::identity());
    tokio_test::block_on(service.generate_puzzle(difficulty, None)).unwrap()
}

/// Match the first available pair until the board is clear or stuck.
fn play_greedily(engine: &mut RhymeMatchingEngine) -> usize {
    let mut matches = 0;
    while let Some(&(a, b)) = StackedLayoutGenerator::available_pairs(engine.tiles()).first() {
        assert_eq!(engine.select_tile(a), Ok(SelectOutcome::Selected(a)));
        match engine.select_tile(b) {
            Ok(SelectOutcome::Matched(result)) => assert!(result.is_valid),
            other => panic!("expected a match, got {:?}", other),
        }
        matches += 1;
        engine.tick(REMOVAL_DELAY_MS);
        assert!(StackedLayoutGenerator::exposure_is_consistent(engine.tiles()));
    }
    matches
}

#[test]
fn test_curated_easy_board_solves_end_to_end() {
    // The identity shuffle puts one whole group on the upper layer, so an
    // exposed pair exists until the board is clear.
    let mut engine = RhymeMatchingEngine::new(curated(Difficulty::Easy));
    assert_eq!(engine.puzzle().total_tiles, 24);

    let matches = play_greedily(&mut engine);
    assert_eq!(matches, 12);

    let stats = engine.game_stats();
    assert!(stats.is_complete);
    assert_eq!(stats.remaining_tiles, 0);
    assert_eq!(stats.completed_matches, 12);
    assert_eq!(stats.current_score, 1200);
    assert_eq!(stats.progress, 100);
    assert_eq!(stats.star_rating, 3);
    assert!(engine.tiles().iter().all(|t| t.is_removed));
}

#[test]
fn test_shuffled_curated_boards_solve_end_to_end() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for seed in 1..=50 {
            let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(seed));
            let puzzle = tokio_test::block_on(service.generate_puzzle(difficulty, None)).unwrap();
            let pairs = puzzle.total_tiles / 2;
            let mut engine = RhymeMatchingEngine::new(puzzle);

            assert_eq!(play_greedily(&mut engine), pairs, "{:?} seed {}", difficulty, seed);
            assert!(engine.state().is_complete());
        }
    }
}

#[test]
fn test_selection_after_completion_is_rejected() {
    let mut engine = RhymeMatchingEngine::new(puzzle(vec![
        tile(0, "day", 0, (0, 0, 0)),
        tile(1, "play", 0, (0, 3, 0)),
    ]));
    engine.select_tile(0).unwrap();
    engine.select_tile(1).unwrap();
    engine.tick(REMOVAL_DELAY_MS);

    assert!(engine.state().is_complete());
    assert_eq!(engine.select_tile(0), Err(SelectError::TileRemoved(0)));
}

#[test]
fn test_exposure_hint_scenario() {
    // Two exposed tiles from different groups, one tile fully blocked.
    let mut engine = RhymeMatchingEngine::new(puzzle(vec![
        tile(0, "cat", 0, (1, 1, 1)),
        tile(1, "light", 1, (1, 5, 0)),
        tile(2, "hat", 0, (1, 1, 0)),
    ]));
    assert!(engine.tile(0).unwrap().is_exposed);
    assert!(engine.tile(1).unwrap().is_exposed);
    assert!(!engine.tile(2).unwrap().is_exposed);

    let hint = engine.get_hint();
    assert_eq!(hint.kind, HintKind::Exposure);
    assert_eq!(hint.cost, HINT_COST);
    assert_eq!(engine.state().hints_used(), 1);
}

#[test]
fn test_star_rating_table() {
    let mut engine = RhymeMatchingEngine::new(puzzle(vec![
        tile(0, "day", 0, (0, 0, 0)),
        tile(1, "light", 1, (0, 3, 0)),
        tile(2, "play", 0, (0, 6, 0)),
        tile(3, "night", 1, (3, 0, 0)),
    ]));
    assert_eq!(engine.calculate_star_rating(), 3);

    engine.get_hint();
    assert_eq!(engine.calculate_star_rating(), 1);

    // mistakes do not matter once two hints are used
    engine.get_hint();
    engine.select_tile(0).unwrap();
    engine.select_tile(1).unwrap();
    assert_eq!(engine.state().mistakes(), 1);
    assert_eq!(engine.calculate_star_rating(), 0);

    engine.reset_game();
    for _ in 0..3 {
        engine.select_tile(0).unwrap();
        engine.select_tile(1).unwrap();
    }
    assert_eq!(engine.calculate_star_rating(), 1);
}

#[test]
fn test_removal_exposes_only_fully_uncovered_tiles() {
    // Tile 0 is covered by the pair (2, 3) only; tile 1 also sits under tile 4.
    let mut tiles = vec![
        tile(0, "cake", 0, (1, 1, 0)),
        tile(1, "lake", 0, (1, 3, 0)),
        tile(2, "ring", 1, (0, 1, 1)),
        tile(3, "sing", 1, (2, 2, 1)),
        tile(4, "day", 2, (1, 4, 1)),
    ];
    rhyme_mahjong::core::exposure::recompute_exposure(&mut tiles);
    assert_eq!(tiles[0].blocked_by, vec![2, 3]);
    assert_eq!(tiles[1].blocked_by, vec![3, 4]);

    let layout = StackedLayoutGenerator::default();
    let exposed = layout.remove_tiles(&mut tiles, &[2, 3]);

    assert_eq!(exposed, vec![0]);
    assert!(tiles[0].is_exposed);
    assert!(!tiles[1].is_exposed);
    assert_eq!(tiles[1].blocked_by, vec![4]);
}

#[test]
fn test_reset_restores_a_fresh_session() {
    let mut engine = RhymeMatchingEngine::new(curated(Difficulty::Medium));
    let initial = engine.game_stats();

    play_greedily(&mut engine);
    engine.get_hint();
    engine.reset_game();

    let stats = engine.game_stats();
    assert_eq!(stats.current_score, 0);
    assert_eq!(stats.completed_matches, 0);
    assert_eq!(stats.hints_used, 0);
    assert_eq!(stats.remaining_tiles, initial.remaining_tiles);
    assert_eq!(engine.tiles(), engine.puzzle().tiles.as_slice());
}
