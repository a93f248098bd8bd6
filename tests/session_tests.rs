//! Play session driven by game actions, rendered through the board view

use rhyme_mahjong::core::SequenceRng;
use rhyme_mahjong::generator::{DisabledAnalyzer, PuzzleGenerationService};
use rhyme_mahjong::term::{BoardView, FrameBuffer};
use rhyme_mahjong::types::{
    Difficulty, GameAction, GridDimensions, GroupId, LayoutKind, PuzzleMetadata, PuzzleSource,
    RhymeMahjongPuzzle, RhymeTile, RhymeType, TilePosition, REMOVAL_DELAY_MS,
};
use rhyme_mahjong::PlaySession;

fn curated_easy() -> RhymeMahjongPuzzle {
    let mut service = PuzzleGenerationService::new(DisabledAnalyzer, SequenceRng::identity());
    tokio_test::block_on(service.generate_puzzle(Difficulty::Easy, None)).unwrap()
}

fn two_tile_puzzle() -> RhymeMahjongPuzzle {
    let tiles = vec![
        RhymeTile::new(0, "day", GroupId(0), RhymeType::Exact, TilePosition::new(0, 0, 0)),
        RhymeTile::new(1, "play", GroupId(0), RhymeType::Exact, TilePosition::new(0, 2, 0)),
    ];
    RhymeMahjongPuzzle {
        id: "pair".to_string(),
        source_text: String::new(),
        tiles,
        groups: Vec::new(),
        grid: GridDimensions {
            width: 3,
            height: 1,
            layers: 1,
        },
        total_tiles: 2,
        layout: LayoutKind::Simple,
        metadata: PuzzleMetadata::default(),
    }
}

#[test]
fn test_new_session_starts_at_the_corner() {
    let session = PlaySession::new(curated_easy());
    assert_eq!((session.cursor().row, session.cursor().col), (0, 0));
    assert_eq!(session.message(), "Match exposed tiles that rhyme");

    let view = session.view_state();
    assert!(view.title.contains("easy"), "{}", view.title);
    assert!(view.title.contains("simple"), "{}", view.title);
    assert!(view.title.contains("24 tiles"), "{}", view.title);
}

#[test]
fn test_low_confidence_text_is_flagged_on_open() {
    let mut puzzle = two_tile_puzzle();
    puzzle.metadata.source = PuzzleSource::Custom;
    puzzle.metadata.low_confidence = true;
    let session = PlaySession::new(puzzle);
    assert_eq!(
        session.message(),
        "Playing rhymes from your text (few distinct word endings, rhymes may be loose)"
    );

    let mut puzzle = two_tile_puzzle();
    puzzle.metadata.source = PuzzleSource::Custom;
    let session = PlaySession::new(puzzle);
    assert_eq!(session.message(), "Playing rhymes from your text");
}

#[test]
fn test_select_on_covered_cell_reports_the_blocker() {
    // Identity shuffle: the upper layer covers the bottom-left corner.
    let mut session = PlaySession::new(curated_easy());
    session.apply(GameAction::CursorDown);
    session.apply(GameAction::CursorDown);
    session.apply(GameAction::Select);

    let covered = session.engine().topmost_at(2, 0).unwrap().id;
    assert_eq!(
        session.message(),
        format!("tile {} is covered by a higher tile", covered)
    );
    assert!(session.engine().state().selected().is_empty());
}

#[test]
fn test_matching_through_the_cursor() {
    let mut session = PlaySession::new(curated_easy());
    // (0,1) and (0,2) hold the two copies of the first upper-layer word.
    session.apply(GameAction::CursorRight);
    session.apply(GameAction::Select);
    assert!(session.message().starts_with("Selected"), "{}", session.message());

    session.apply(GameAction::CursorRight);
    session.apply(GameAction::Select);
    assert_eq!(session.message(), "Match! exact rhyme +100");
    assert_eq!(session.engine().game_stats().current_score, 100);
}

#[test]
fn test_hint_moves_cursor_to_suggested_tile() {
    let mut session = PlaySession::new(curated_easy());
    session.apply(GameAction::Hint);

    let stats = session.engine().game_stats();
    assert_eq!(stats.hints_used, 1);
    assert!(session.message().ends_with("(-50)"), "{}", session.message());

    let cursor = session.cursor();
    let tile = session.engine().topmost_at(cursor.row, cursor.col).unwrap();
    assert!(tile.is_exposed);
}

#[test]
fn test_completion_is_announced_and_reset_clears_it() {
    let mut session = PlaySession::new(two_tile_puzzle());
    session.apply(GameAction::Select);
    session.apply(GameAction::CursorRight);
    session.apply(GameAction::Select);
    assert!(session.message().starts_with("Nothing here"));

    session.apply(GameAction::CursorRight);
    session.apply(GameAction::Select);
    session.tick(REMOVAL_DELAY_MS);

    assert!(session.engine().state().is_complete());
    assert_eq!(session.message(), "Solved! 100 points, 3 of 3 stars");

    session.apply(GameAction::Reset);
    assert_eq!(session.message(), "Board reset");
    assert!(!session.engine().state().is_complete());
}

#[test]
fn test_session_renders_title_and_status() {
    let session = PlaySession::new(curated_easy());
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    view.render(session.engine(), &session.view_state(), 110, 20, &mut fb);

    assert!(fb.row_text(0).contains("Rhyme Mahjong"));
    let status = fb.row_text(view.status_row(session.engine().puzzle().grid.height));
    assert!(status.contains("Matches 0/12"), "{}", status);
    assert!(status.contains("Left 24"), "{}", status);
}
