//! Property tests for matching, exposure and curated generation

use proptest::prelude::*;

use rhyme_mahjong::core::{
    validate_match, RhymeMatchingEngine, SimpleRng, StackedLayoutGenerator,
};
use rhyme_mahjong::generator::{DisabledAnalyzer, PuzzleGenerationService};
use rhyme_mahjong::types::{
    Difficulty, GroupId, LayoutKind, RhymeGroup, RhymeMahjongPuzzle, RhymeType, REMOVAL_DELAY_MS,
};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn layout_kind() -> impl Strategy<Value = LayoutKind> {
    prop_oneof![
        Just(LayoutKind::Simple),
        Just(LayoutKind::Pyramid),
        Just(LayoutKind::Turtle),
    ]
}

fn curated(difficulty: Difficulty, seed: u32) -> RhymeMahjongPuzzle {
    let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SimpleRng::new(seed));
    tokio_test::block_on(service.generate_puzzle(difficulty, None)).unwrap()
}

fn groups(sizes: &[(usize, bool)]) -> Vec<RhymeGroup> {
    sizes
        .iter()
        .enumerate()
        .map(|(g, &(n, exact))| RhymeGroup {
            id: GroupId(g as u16),
            pattern: format!("-g{}", g),
            words: (0..n).map(|w| format!("w{}x{}", g, w)).collect(),
            rhyme_type: if exact { RhymeType::Exact } else { RhymeType::Slant },
            difficulty: Difficulty::Medium,
            significance: 1.0,
        })
        .collect()
}

proptest! {
    #[test]
    fn curated_tile_count_is_six_per_group(d in difficulty(), seed in any::<u32>()) {
        let puzzle = curated(d, seed);
        prop_assert_eq!(puzzle.total_tiles, puzzle.metadata.group_count * 6);
        prop_assert_eq!(puzzle.total_tiles % 2, 0);
        prop_assert_eq!(puzzle.tiles.len(), puzzle.total_tiles);
    }

    #[test]
    fn curated_boards_clear_with_greedy_play(d in difficulty(), seed in any::<u32>()) {
        let puzzle = curated(d, seed);
        let pairs = puzzle.total_tiles / 2;
        let mut engine = RhymeMatchingEngine::new(puzzle);

        for _ in 0..pairs {
            let Some(&(a, b)) = StackedLayoutGenerator::available_pairs(engine.tiles()).first() else {
                break;
            };
            prop_assert!(engine.select_tile(a).is_ok());
            prop_assert!(engine.select_tile(b).is_ok());
            engine.tick(REMOVAL_DELAY_MS);
        }

        prop_assert!(engine.state().is_complete());
        prop_assert_eq!(engine.game_stats().mistakes, 0);
    }

    #[test]
    fn validate_match_is_symmetric(
        sizes in prop::collection::vec((1usize..4, any::<bool>()), 1..6),
        kind in layout_kind(),
        seed in any::<u32>(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..20),
    ) {
        let mut rng = SimpleRng::new(seed);
        let puzzle = StackedLayoutGenerator::default()
            .generate_mahjong_layout(&groups(&sizes), kind, &mut rng)
            .unwrap();

        for (i, j) in picks {
            let a = &puzzle.tiles[i.index(puzzle.tiles.len())];
            let b = &puzzle.tiles[j.index(puzzle.tiles.len())];
            let ab = validate_match(a, b);
            let ba = validate_match(b, a);
            prop_assert_eq!(ab.is_valid, ba.is_valid);
            prop_assert_eq!(ab.match_type, ba.match_type);
            prop_assert_eq!(ab.points, ba.points);
        }
    }

    #[test]
    fn exposure_stays_consistent_under_removal(
        kind in layout_kind(),
        seed in any::<u32>(),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..30),
    ) {
        let mut rng = SimpleRng::new(seed);
        let layout = StackedLayoutGenerator::default();
        let mut puzzle = layout
            .generate_mahjong_layout(&groups(&[(3, true); 7]), kind, &mut rng)
            .unwrap();
        prop_assert!(StackedLayoutGenerator::exposure_is_consistent(&puzzle.tiles));

        for idx in removals {
            let id = puzzle.tiles[idx.index(puzzle.tiles.len())].id;
            let exposed = layout.remove_tiles(&mut puzzle.tiles, &[id]);
            prop_assert!(StackedLayoutGenerator::exposure_is_consistent(&puzzle.tiles));
            for e in exposed {
                let t = puzzle.tiles.iter().find(|t| t.id == e).unwrap();
                prop_assert!(t.is_exposed && !t.is_removed && t.blocked_by.is_empty());
            }
        }
    }

    #[test]
    fn layouts_never_overflow_and_stay_even(
        sizes in prop::collection::vec((1usize..4, any::<bool>()), 1..12),
        kind in layout_kind(),
        seed in any::<u32>(),
    ) {
        let mut rng = SimpleRng::new(seed);
        let puzzle = StackedLayoutGenerator::default()
            .generate_mahjong_layout(&groups(&sizes), kind, &mut rng)
            .unwrap();
        prop_assert_eq!(puzzle.total_tiles % 2, 0);
        prop_assert!(puzzle.total_tiles <= rhyme_mahjong::core::layout::capacity(kind));

        let mut cells: Vec<_> = puzzle.tiles.iter().map(|t| t.position).collect();
        cells.sort_by_key(|p| (p.layer, p.row, p.col));
        cells.dedup();
        prop_assert_eq!(cells.len(), puzzle.tiles.len());
    }
}
