//! Matching engine - live session state for one puzzle
//!
//! The engine owns the tile list and every counter of a session. Player
//! actions run synchronously; the only deferred work is the removal of a
//! matched pair, which is scheduled on the engine's virtual clock and applied
//! by [`RhymeMatchingEngine::tick`].
//!
//! Per-tile flow: `idle → selecting → matched → removing → idle (removed)`,
//! with `exposing` entered when a removal uncovers a tile.
//!
//! Score and the completed-match list update the moment a pair is accepted;
//! only `is_removed`/`is_exposed` wait for the removal delay. A tile waiting
//! for removal cannot be selected again.

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::exposure::recompute_exposure;
use crate::layout::StackedLayoutGenerator;
use crate::scheduler::{ScheduledEvent, Scheduler};
use crate::scoring::{self, calculate_progress, calculate_star_rating, MatchResult};
use crate::snapshot::GameStats;
use crate::types::{
    RhymeMahjongPuzzle, RhymeTile, TileAnimation, TileId, ANIMATION_SETTLE_MS, HINT_COST,
    REMOVAL_DELAY_MS,
};

/// Why a selection was rejected. A rejected selection changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("unknown tile {0}")]
    UnknownTile(TileId),
    #[error("tile {0} has been removed")]
    TileRemoved(TileId),
    #[error("tile {0} is covered by a higher tile")]
    TileNotExposed(TileId),
    #[error("tile {0} is already matched and waiting for removal")]
    PendingRemoval(TileId),
}

/// Result of a successful `select_tile` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Tile joined the selection (one tile selected)
    Selected(TileId),
    /// Tile was already selected and has been released
    Deselected(TileId),
    /// Second tile completed a valid pair
    Matched(MatchResult),
    /// Second tile did not match; a mistake was counted
    Mismatched(MatchResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    /// These two exposed tiles match
    Match { first: TileId, second: TileId },
    /// No exposed pair, but covered tiles remain
    Exposure,
    /// Nothing to suggest
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub kind: HintKind,
    /// Points deducted from the score
    pub cost: u32,
    pub message: String,
}

/// Mutable state of one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    tiles: Vec<RhymeTile>,
    selected: ArrayVec<TileId, 2>,
    completed_matches: Vec<(TileId, TileId)>,
    mistakes: u32,
    hints_used: u32,
    /// Virtual time since the session started
    elapsed_ms: u64,
    is_complete: bool,
    score: u32,
}

impl GameState {
    fn new(initial: &[RhymeTile]) -> Self {
        let mut tiles = initial.to_vec();
        for t in &mut tiles {
            t.is_selected = false;
            t.animation = TileAnimation::Idle;
        }
        recompute_exposure(&mut tiles);
        let is_complete = tiles.iter().all(|t| t.is_removed);

        Self {
            tiles,
            selected: ArrayVec::new(),
            completed_matches: Vec::new(),
            mistakes: 0,
            hints_used: 0,
            elapsed_ms: 0,
            is_complete,
            score: 0,
        }
    }

    pub fn tiles(&self) -> &[RhymeTile] {
        &self.tiles
    }

    pub fn selected(&self) -> &[TileId] {
        &self.selected
    }

    pub fn completed_matches(&self) -> &[(TileId, TileId)] {
        &self.completed_matches
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Drives one puzzle session until completion.
#[derive(Debug, Clone)]
pub struct RhymeMatchingEngine {
    puzzle: RhymeMahjongPuzzle,
    state: GameState,
    scheduler: Scheduler,
}

impl RhymeMatchingEngine {
    pub fn new(puzzle: RhymeMahjongPuzzle) -> Self {
        let state = GameState::new(&puzzle.tiles);
        Self {
            puzzle,
            state,
            scheduler: Scheduler::new(),
        }
    }

    pub fn puzzle(&self) -> &RhymeMahjongPuzzle {
        &self.puzzle
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tiles(&self) -> &[RhymeTile] {
        &self.state.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&RhymeTile> {
        self.state.tiles.iter().find(|t| t.id == id)
    }

    /// Topmost tile still on the board at a grid cell
    pub fn topmost_at(&self, row: u8, col: u8) -> Option<&RhymeTile> {
        self.state
            .tiles
            .iter()
            .filter(|t| !t.is_removed && t.position.row == row && t.position.col == col)
            .max_by_key(|t| t.position.layer)
    }

    /// Whether a matched pair is still waiting to leave the board
    pub fn has_pending_removals(&self) -> bool {
        self.scheduler
            .has_pending(|e| matches!(e, ScheduledEvent::RemovePair(_)))
    }

    fn index_of(&self, id: TileId) -> Option<usize> {
        self.state.tiles.iter().position(|t| t.id == id)
    }

    fn check_selectable(&self, id: TileId) -> Result<usize, SelectError> {
        let idx = self.index_of(id).ok_or(SelectError::UnknownTile(id))?;
        let tile = &self.state.tiles[idx];
        if tile.is_removed {
            return Err(SelectError::TileRemoved(id));
        }
        if tile.animation == TileAnimation::Matched {
            return Err(SelectError::PendingRemoval(id));
        }
        if !tile.is_exposed {
            return Err(SelectError::TileNotExposed(id));
        }
        Ok(idx)
    }

    /// Select or deselect a tile. A second selected tile triggers validation.
    pub fn select_tile(&mut self, id: TileId) -> Result<SelectOutcome, SelectError> {
        let idx = self.check_selectable(id)?;

        if let Some(pos) = self.state.selected.iter().position(|&s| s == id) {
            self.state.selected.remove(pos);
            let tile = &mut self.state.tiles[idx];
            tile.is_selected = false;
            tile.animation = TileAnimation::Idle;
            return Ok(SelectOutcome::Deselected(id));
        }

        // The selection never rests at two tiles, so there is always room.
        self.state.selected.push(id);
        let tile = &mut self.state.tiles[idx];
        tile.is_selected = true;
        tile.animation = TileAnimation::Selecting;

        if self.state.selected.len() < 2 {
            return Ok(SelectOutcome::Selected(id));
        }

        let pair = [self.state.selected[0], self.state.selected[1]];
        let result = self.process_match(pair)?;
        Ok(if result.is_valid {
            SelectOutcome::Matched(result)
        } else {
            SelectOutcome::Mismatched(result)
        })
    }

    /// Validate a pair of tiles without touching the session
    pub fn validate_match(&self, a: TileId, b: TileId) -> Option<MatchResult> {
        let ta = self.tile(a)?;
        let tb = self.tile(b)?;
        Some(scoring::validate_match(ta, tb))
    }

    /// Resolve a candidate pair: score it and schedule its removal, or count a mistake.
    ///
    /// Either way the selection is cleared.
    pub fn process_match(&mut self, ids: [TileId; 2]) -> Result<MatchResult, SelectError> {
        let ia = self.check_selectable(ids[0])?;
        let ib = self.check_selectable(ids[1])?;
        let result = scoring::validate_match(&self.state.tiles[ia], &self.state.tiles[ib]);

        self.clear_selection();

        if result.is_valid {
            for i in [ia, ib] {
                let tile = &mut self.state.tiles[i];
                tile.is_selected = false;
                tile.animation = TileAnimation::Matched;
            }
            self.state.completed_matches.push((ids[0], ids[1]));
            self.state.score = self.state.score.saturating_add(result.points);
            self.scheduler
                .schedule_in(REMOVAL_DELAY_MS, ScheduledEvent::RemovePair(ids));
            debug!(
                first = ids[0],
                second = ids[1],
                points = result.points,
                score = self.state.score,
                "match accepted"
            );
        } else {
            self.state.mistakes += 1;
            debug!(
                first = ids[0],
                second = ids[1],
                mistakes = self.state.mistakes,
                "match rejected"
            );
        }

        Ok(result)
    }

    fn clear_selection(&mut self) {
        let selected: ArrayVec<TileId, 2> = std::mem::take(&mut self.state.selected);
        for id in selected {
            if let Some(i) = self.index_of(id) {
                let tile = &mut self.state.tiles[i];
                tile.is_selected = false;
                if tile.animation == TileAnimation::Selecting {
                    tile.animation = TileAnimation::Idle;
                }
            }
        }
    }

    /// Suggest a move. Every call counts as a used hint, even when nothing is found.
    pub fn get_hint(&mut self) -> Hint {
        self.state.hints_used += 1;

        let pairs = StackedLayoutGenerator::available_pairs(&self.state.tiles);
        let hint = if let Some(&(first, second)) = pairs.first() {
            let word = |id| self.tile(id).map(|t| t.word.as_str()).unwrap_or("");
            Hint {
                kind: HintKind::Match { first, second },
                cost: HINT_COST,
                message: format!("\"{}\" rhymes with \"{}\"", word(first), word(second)),
            }
        } else if self
            .state
            .tiles
            .iter()
            .any(|t| !t.is_removed && !t.is_exposed)
        {
            Hint {
                kind: HintKind::Exposure,
                cost: HINT_COST,
                message: "Clear tiles on higher layers to expose more words".to_string(),
            }
        } else {
            Hint {
                kind: HintKind::None,
                cost: 0,
                message: "No moves available".to_string(),
            }
        };

        self.state.score = self.state.score.saturating_sub(hint.cost);
        debug!(
            kind = ?hint.kind,
            hints_used = self.state.hints_used,
            score = self.state.score,
            "hint given"
        );
        hint
    }

    pub fn calculate_star_rating(&self) -> u8 {
        calculate_star_rating(self.state.mistakes, self.state.hints_used)
    }

    pub fn game_stats(&self) -> GameStats {
        let total_tiles = self.puzzle.total_tiles;
        let completed = self.state.completed_matches.len();
        GameStats {
            total_tiles,
            remaining_tiles: self.state.tiles.iter().filter(|t| !t.is_removed).count(),
            completed_matches: completed,
            mistakes: self.state.mistakes,
            hints_used: self.state.hints_used,
            current_score: self.state.score,
            progress: calculate_progress(completed * 2, total_tiles),
            star_rating: self.calculate_star_rating(),
            is_complete: self.state.is_complete,
            elapsed_ms: self.state.elapsed_ms,
        }
    }

    /// Restart the session on the same puzzle, cancelling pending removals.
    pub fn reset_game(&mut self) {
        self.scheduler.cancel_all();
        self.state = GameState::new(&self.puzzle.tiles);
        debug!(puzzle = %self.puzzle.id, "session reset");
    }

    /// Advance virtual time and apply any deferred work that became due.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.state.elapsed_ms += elapsed_ms as u64;

        for event in self.scheduler.advance(elapsed_ms) {
            match event {
                ScheduledEvent::RemovePair(ids) => self.finish_removal(ids),
                ScheduledEvent::Settle(id) => {
                    if let Some(i) = self.index_of(id) {
                        let tile = &mut self.state.tiles[i];
                        if matches!(
                            tile.animation,
                            TileAnimation::Removing | TileAnimation::Exposing
                        ) {
                            tile.animation = TileAnimation::Idle;
                        }
                    }
                }
            }
        }
    }

    fn finish_removal(&mut self, ids: [TileId; 2]) {
        for id in ids {
            if let Some(i) = self.index_of(id) {
                let tile = &mut self.state.tiles[i];
                tile.is_removed = true;
                tile.is_selected = false;
                tile.animation = TileAnimation::Removing;
                self.scheduler
                    .schedule_in(ANIMATION_SETTLE_MS, ScheduledEvent::Settle(id));
            }
        }

        let newly_exposed = recompute_exposure(&mut self.state.tiles);
        for id in newly_exposed {
            if let Some(i) = self.index_of(id) {
                self.state.tiles[i].animation = TileAnimation::Exposing;
                self.scheduler
                    .schedule_in(ANIMATION_SETTLE_MS, ScheduledEvent::Settle(id));
            }
        }

        if !self.state.is_complete && self.state.tiles.iter().all(|t| t.is_removed) {
            self.state.is_complete = true;
            info!(
                puzzle = %self.puzzle.id,
                score = self.state.score,
                mistakes = self.state.mistakes,
                hints_used = self.state.hints_used,
                stars = self.calculate_star_rating(),
                elapsed_ms = self.state.elapsed_ms,
                "puzzle complete"
            );
        }
    }
}
