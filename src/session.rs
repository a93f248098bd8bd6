//! Play session: an engine, a board cursor and the last status message.
//!
//! Turns [`GameAction`]s into engine calls. The binary owns the clock and
//! the terminal; everything here is deterministic.

use crate::core::{HintKind, RhymeMatchingEngine, SelectOutcome};
use crate::input::BoardCursor;
use crate::term::ViewState;
use crate::types::{GameAction, PuzzleSource, RhymeMahjongPuzzle, RhymeType};

pub struct PlaySession {
    engine: RhymeMatchingEngine,
    cursor: BoardCursor,
    title: String,
    message: String,
    announced: bool,
}

impl PlaySession {
    pub fn new(puzzle: RhymeMahjongPuzzle) -> Self {
        let title = format!(
            "Rhyme Mahjong  {}  {}  {} tiles",
            puzzle.metadata.difficulty.as_str(),
            puzzle.layout.as_str(),
            puzzle.total_tiles
        );
        let message = opening_message(&puzzle);
        let cursor = BoardCursor::new(puzzle.grid);
        Self {
            engine: RhymeMatchingEngine::new(puzzle),
            cursor,
            title,
            message,
            announced: false,
        }
    }

    pub fn engine(&self) -> &RhymeMatchingEngine {
        &self.engine
    }

    pub fn cursor(&self) -> BoardCursor {
        self.cursor
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn view_state(&self) -> ViewState<'_> {
        ViewState {
            title: &self.title,
            cursor: (self.cursor.row, self.cursor.col),
            message: &self.message,
        }
    }

    /// Advance virtual time; announces completion once.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.engine.tick(elapsed_ms);
        if self.engine.state().is_complete() && !self.announced {
            self.announced = true;
            let stats = self.engine.game_stats();
            self.message = format!(
                "Solved! {} points, {} of 3 stars",
                stats.current_score, stats.star_rating
            );
        }
    }

    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::CursorUp
            | GameAction::CursorDown
            | GameAction::CursorLeft
            | GameAction::CursorRight => {
                self.cursor.apply(action);
            }
            GameAction::Select => self.select_under_cursor(),
            GameAction::Hint => {
                let hint = self.engine.get_hint();
                if let HintKind::Match { first, .. } = hint.kind {
                    if let Some(tile) = self.engine.tile(first) {
                        self.cursor.row = tile.position.row;
                        self.cursor.col = tile.position.col;
                    }
                }
                self.message = if hint.cost > 0 {
                    format!("{} (-{})", hint.message, hint.cost)
                } else {
                    hint.message
                };
            }
            GameAction::Reset => {
                self.engine.reset_game();
                self.announced = false;
                self.message = "Board reset".to_string();
            }
        }
    }

    fn select_under_cursor(&mut self) {
        let Some((id, word)) = self
            .engine
            .topmost_at(self.cursor.row, self.cursor.col)
            .map(|t| (t.id, t.word.clone()))
        else {
            self.message = "Nothing here".to_string();
            return;
        };

        self.message = match self.engine.select_tile(id) {
            Ok(SelectOutcome::Selected(_)) => format!("Selected \"{}\"", word),
            Ok(SelectOutcome::Deselected(_)) => format!("Released \"{}\"", word),
            Ok(SelectOutcome::Matched(result)) => {
                let kind = match result.match_type {
                    Some(RhymeType::Slant) => "slant rhyme",
                    _ => "exact rhyme",
                };
                format!("Match! {} +{}", kind, result.points)
            }
            Ok(SelectOutcome::Mismatched(_)) => format!("\"{}\" does not rhyme there", word),
            Err(err) => err.to_string(),
        };
    }
}

fn opening_message(puzzle: &RhymeMahjongPuzzle) -> String {
    let meta = &puzzle.metadata;
    let message = match meta.source {
        PuzzleSource::Fallback => "Text analysis unavailable, playing curated words".to_string(),
        PuzzleSource::Custom if meta.supplemented => format!(
            "Your text was short on rhymes; {} curated tiles added",
            meta.supplement_count
        ),
        PuzzleSource::Custom => "Playing rhymes from your text".to_string(),
        PuzzleSource::Curated => "Match exposed tiles that rhyme".to_string(),
    };
    if meta.low_confidence {
        format!("{} (few distinct word endings, rhymes may be loose)", message)
    } else {
        message
    }
}
