//! Board cursor, clamped to the grid.

use crate::types::{GameAction, GridDimensions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardCursor {
    pub row: u8,
    pub col: u8,
    grid: GridDimensions,
}

impl BoardCursor {
    pub fn new(grid: GridDimensions) -> Self {
        Self { row: 0, col: 0, grid }
    }

    pub fn grid(&self) -> GridDimensions {
        self.grid
    }

    /// Apply a cursor action. Returns true if the cursor moved.
    ///
    /// Non-cursor actions are ignored.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let max_row = self.grid.height.saturating_sub(1);
        let max_col = self.grid.width.saturating_sub(1);
        let (row, col) = match action {
            GameAction::CursorUp => (self.row.saturating_sub(1), self.col),
            GameAction::CursorDown => ((self.row + 1).min(max_row), self.col),
            GameAction::CursorLeft => (self.row, self.col.saturating_sub(1)),
            GameAction::CursorRight => (self.row, (self.col + 1).min(max_col)),
            _ => return false,
        };
        let moved = (row, col) != (self.row, self.col);
        self.row = row;
        self.col = col;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridDimensions {
        GridDimensions {
            width: 3,
            height: 2,
            layers: 1,
        }
    }

    #[test]
    fn moves_within_bounds() {
        let mut c = BoardCursor::new(grid());
        assert!(c.apply(GameAction::CursorRight));
        assert!(c.apply(GameAction::CursorDown));
        assert_eq!((c.row, c.col), (1, 1));
    }

    #[test]
    fn clamps_at_edges() {
        let mut c = BoardCursor::new(grid());
        assert!(!c.apply(GameAction::CursorUp));
        assert!(!c.apply(GameAction::CursorLeft));

        c.apply(GameAction::CursorRight);
        c.apply(GameAction::CursorRight);
        assert!(!c.apply(GameAction::CursorRight));
        assert_eq!(c.col, 2);
    }

    #[test]
    fn ignores_non_cursor_actions() {
        let mut c = BoardCursor::new(grid());
        assert!(!c.apply(GameAction::Select));
        assert_eq!((c.row, c.col), (0, 0));
    }
}
