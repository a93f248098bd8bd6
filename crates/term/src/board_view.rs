//! BoardView: draws a matching session into a framebuffer.
//!
//! Pure (no I/O). Each grid cell shows its topmost remaining tile as
//! `[<layer> <word>]`. Exposed tiles are bright, covered tiles dim; the
//! selection, pending matches and the cursor get their own backgrounds.

use crate::core::{GameStats, RhymeMatchingEngine};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{RhymeTile, TileAnimation};

const BOARD_TOP: u16 = 2;
const BOARD_LEFT: u16 = 1;
const WORD_W: usize = 8;

const EXPOSED: Style = Style::fg(Rgb::new(240, 240, 240)).bold();
const COVERED: Style = Style::fg(Rgb::new(120, 120, 130)).dim();
const EMPTY: Style = Style::fg(Rgb::new(60, 60, 70));
const SELECTED: Style = Style::fg(Rgb::new(0, 0, 0)).on(Rgb::new(230, 200, 60)).bold();
const MATCHED: Style = Style::fg(Rgb::new(0, 0, 0)).on(Rgb::new(90, 200, 110));
const CURSOR_BG: Rgb = Rgb::new(40, 70, 150);
const STATUS: Style = Style::fg(Rgb::new(180, 200, 255));
const MESSAGE: Style = Style::fg(Rgb::new(255, 220, 150));
const HELP: Style = Style::fg(Rgb::new(110, 110, 120));

/// Per-frame inputs that are not part of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState<'a> {
    pub title: &'a str,
    /// (row, col) of the board cursor
    pub cursor: (u8, u8),
    pub message: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // "[" + layer + " " + word + "]"
        Self {
            cell_w: WORD_W as u16 + 4,
            cell_h: 2,
        }
    }
}

impl BoardView {
    /// Row of the status line for a board with `grid_rows` rows
    pub fn status_row(&self, grid_rows: u8) -> u16 {
        BOARD_TOP + grid_rows as u16 * self.cell_h + 1
    }

    pub fn render(
        &self,
        engine: &RhymeMatchingEngine,
        view: &ViewState<'_>,
        width: u16,
        height: u16,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(width, height);
        fb.put_str(BOARD_LEFT, 0, view.title, STATUS.bold());

        let grid = engine.puzzle().grid;
        for row in 0..grid.height {
            for col in 0..grid.width {
                let x = BOARD_LEFT + col as u16 * self.cell_w;
                let y = BOARD_TOP + row as u16 * self.cell_h;
                let tile = engine.topmost_at(row, col);

                let mut style = tile.map_or(EMPTY, tile_style);
                if view.cursor == (row, col) {
                    style = style.on(CURSOR_BG);
                }
                fb.put_str(x, y, &cell_text(tile), style);
            }
        }

        let stats = engine.game_stats();
        let status_y = self.status_row(grid.height);
        fb.put_str(BOARD_LEFT, status_y, &status_line(&stats), STATUS);
        fb.put_str(BOARD_LEFT, status_y + 1, view.message, MESSAGE);
        fb.put_str(
            BOARD_LEFT,
            status_y + 3,
            "arrows/hjkl move  enter select  ? hint  r reset  q quit",
            HELP,
        );
    }
}

fn tile_style(tile: &RhymeTile) -> Style {
    if tile.animation == TileAnimation::Matched {
        MATCHED
    } else if tile.is_selected {
        SELECTED
    } else if tile.is_exposed {
        EXPOSED
    } else {
        COVERED
    }
}

fn cell_text(tile: Option<&RhymeTile>) -> String {
    match tile {
        Some(t) => format!(
            "[{} {:<w$.w$}]",
            t.position.layer,
            t.word,
            w = WORD_W
        ),
        None => format!("{:^w$}", "·", w = WORD_W + 4),
    }
}

fn stars(n: u8) -> String {
    (0..3).map(|i| if i < n { '★' } else { '☆' }).collect()
}

/// One-line summary of a session
pub fn status_line(stats: &GameStats) -> String {
    let secs = stats.elapsed_ms / 1000;
    let mut line = format!(
        "Score {}  Matches {}/{}  Left {}  Mistakes {}  Hints {}  {}  {}%  {:02}:{:02}",
        stats.current_score,
        stats.completed_matches,
        stats.total_tiles / 2,
        stats.remaining_tiles,
        stats.mistakes,
        stats.hints_used,
        stars(stats.star_rating),
        stats.progress,
        secs / 60,
        secs % 60,
    );
    if stats.is_complete {
        line.push_str("  COMPLETE");
    }
    line
}
