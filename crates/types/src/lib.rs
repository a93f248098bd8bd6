//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (generation, matching, terminal rendering, analyzer wire mapping).
//!
//! # Board Model
//!
//! A puzzle is a stack of layers. Every tile sits at a logical position
//! `{row, col, layer}`; layer 0 is the bottom of the stack.
//!
//! - A tile is **exposed** when no remaining tile on a higher layer sits within
//!   one row and one column of it.
//! - Tiles exist in matchable pairs, so a puzzle always has an even tile count.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `EXACT_MATCH_POINTS` | 100 | Both tiles carry an exact rhyme |
//! | `SLANT_MATCH_POINTS` | 75 | At least one tile carries a slant rhyme |
//! | `HINT_COST` | 50 | Deducted for a `match` or `exposure` hint |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds of engine (virtual) time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `REMOVAL_DELAY_MS` | 300 | Matched pair stays on the board this long |
//! | `ANIMATION_SETTLE_MS` | 250 | Removing/exposing animation states settle to idle |
//!
//! # Examples
//!
//! ```
//! use rhyme_mahjong_types::{Difficulty, GroupId, LayoutKind, RhymeType};
//!
//! let difficulty = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(difficulty.group_count(), 6);
//! assert_eq!(difficulty.total_tiles(), 36);
//!
//! assert_eq!(RhymeType::from_str("slant"), Some(RhymeType::Slant));
//! assert_eq!(LayoutKind::for_difficulty(Difficulty::Easy), LayoutKind::Simple);
//! assert_eq!(GroupId(2).to_string(), "C");
//! ```

use std::fmt;

/// Tiles per rhyme group on the curated path (three words, two copies each)
pub const TILES_PER_GROUP: usize = 6;

/// Points for a match where both tiles are exact rhymes
pub const EXACT_MATCH_POINTS: u32 = 100;

/// Points for a match involving a slant rhyme
pub const SLANT_MATCH_POINTS: u32 = 75;

/// Score cost of a `match` or `exposure` hint
pub const HINT_COST: u32 = 50;

/// Delay between a valid match and the pair's removal from the board
pub const REMOVAL_DELAY_MS: u32 = 300;

/// Duration of the transient removing/exposing animation states
pub const ANIMATION_SETTLE_MS: u32 = 250;

/// Custom text must be at least this many characters (after trimming)
pub const MIN_TEXT_CHARS: usize = 20;

/// Custom text must contain at least this many words longer than two letters
pub const MIN_TEXT_WORDS: usize = 10;

/// Fewer distinct two-letter endings than this marks the text as low confidence
pub const MIN_DISTINCT_ENDINGS: usize = 3;

/// Backend output with fewer usable tiles than this is supplemented
pub const MIN_USABLE_TILES: usize = 12;

/// Supplementation tops the puzzle up to this many tiles
pub const SUPPLEMENT_TARGET_TILES: usize = 24;

/// Identifier of a tile within one puzzle
pub type TileId = u32;

/// Identifier of a rhyme group, displayed as a letter assigned by group order
///
/// Groups `0..26` display as `A..Z`; later groups display as `G26`, `G27`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u16);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 26 {
            write!(f, "{}", (b'A' + self.0 as u8) as char)
        } else {
            write!(f, "G{}", self.0)
        }
    }
}

/// How closely the words of a group rhyme
///
/// - **Exact**: identical stressed ending (`light` / `night`)
/// - **Slant**: partial sound correspondence (`love` / `move`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RhymeType {
    Exact,
    Slant,
}

impl RhymeType {
    /// Parse rhyme type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Some(RhymeType::Exact),
            "slant" => Some(RhymeType::Slant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RhymeType::Exact => "exact",
            RhymeType::Slant => "slant",
        }
    }
}

/// Puzzle difficulty
///
/// Difficulty fixes the curated group count; every curated group carries
/// [`TILES_PER_GROUP`] tiles.
///
/// | Difficulty | Groups | Tiles | Complexity |
/// |------------|--------|-------|------------|
/// | Easy | 4 | 24 | simple |
/// | Medium | 5 | 30 | moderate |
/// | Hard | 6 | 36 | complex |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use rhyme_mahjong_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("Medium"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("expert"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Number of rhyme groups on the curated path
    pub fn group_count(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 5,
            Difficulty::Hard => 6,
        }
    }

    /// Tiles per group on the curated path
    pub fn tiles_per_group(&self) -> usize {
        TILES_PER_GROUP
    }

    /// Total curated tile count (`group_count × tiles_per_group`)
    pub fn total_tiles(&self) -> usize {
        self.group_count() * self.tiles_per_group()
    }

    pub fn complexity(&self) -> Complexity {
        match self {
            Difficulty::Easy => Complexity::Simple,
            Difficulty::Medium => Complexity::Moderate,
            Difficulty::Hard => Complexity::Complex,
        }
    }
}

/// Coarse puzzle complexity label reported in puzzle metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

/// Named board template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutKind {
    #[default]
    Simple,
    Pyramid,
    Turtle,
}

impl LayoutKind {
    /// Parse layout kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Some(LayoutKind::Simple),
            "pyramid" => Some(LayoutKind::Pyramid),
            "turtle" => Some(LayoutKind::Turtle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Simple => "simple",
            LayoutKind::Pyramid => "pyramid",
            LayoutKind::Turtle => "turtle",
        }
    }

    /// Default template for a difficulty
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => LayoutKind::Simple,
            Difficulty::Medium => LayoutKind::Pyramid,
            Difficulty::Hard => LayoutKind::Turtle,
        }
    }

    /// Next larger template, if any
    pub fn larger(&self) -> Option<Self> {
        match self {
            LayoutKind::Simple => Some(LayoutKind::Pyramid),
            LayoutKind::Pyramid => Some(LayoutKind::Turtle),
            LayoutKind::Turtle => None,
        }
    }
}

/// Logical grid position of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TilePosition {
    pub row: u8,
    pub col: u8,
    pub layer: u8,
}

impl TilePosition {
    pub const fn new(row: u8, col: u8, layer: u8) -> Self {
        Self { row, col, layer }
    }

    /// Whether the footprints of two positions overlap with one-cell tolerance
    pub fn overlaps(&self, other: &TilePosition) -> bool {
        self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

/// Derived pixel position of a tile (not authoritative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Transient per-tile UI state
///
/// The lifecycle is `Idle → Selecting → Matched → Removing → Idle` (with
/// `is_removed` set). `Exposing` is entered when a tile becomes exposed as a
/// side effect of another tile's removal and settles back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileAnimation {
    #[default]
    Idle,
    Selecting,
    Matched,
    Removing,
    Exposing,
}

impl TileAnimation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileAnimation::Idle => "idle",
            TileAnimation::Selecting => "selecting",
            TileAnimation::Matched => "matched",
            TileAnimation::Removing => "removing",
            TileAnimation::Exposing => "exposing",
        }
    }
}

/// A placed tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhymeTile {
    pub id: TileId,
    pub word: String,
    pub rhyme_group: GroupId,
    pub rhyme_type: RhymeType,
    pub position: TilePosition,
    pub is_removed: bool,
    pub is_exposed: bool,
    /// Ids of the tiles currently blocking this one, ascending
    pub blocked_by: Vec<TileId>,
    pub visual: VisualPosition,
    pub is_selected: bool,
    pub animation: TileAnimation,
}

impl RhymeTile {
    /// Create an unplaced-state tile at `position` (exposure is computed later)
    pub fn new(
        id: TileId,
        word: impl Into<String>,
        rhyme_group: GroupId,
        rhyme_type: RhymeType,
        position: TilePosition,
    ) -> Self {
        Self {
            id,
            word: word.into(),
            rhyme_group,
            rhyme_type,
            position,
            is_removed: false,
            is_exposed: true,
            blocked_by: Vec::new(),
            visual: VisualPosition::default(),
            is_selected: false,
            animation: TileAnimation::Idle,
        }
    }

    /// Present on the board and not waiting for a deferred removal
    pub fn is_live(&self) -> bool {
        !self.is_removed && self.animation != TileAnimation::Matched
    }
}

/// A set of words sharing a phonetic ending
///
/// `words` holds one entry per tile pair on the board. It repeats a word only
/// when the source bank had fewer unique words than slots; [`unique_words`]
/// returns the member set.
///
/// [`unique_words`]: RhymeGroup::unique_words
#[derive(Debug, Clone, PartialEq)]
pub struct RhymeGroup {
    pub id: GroupId,
    pub pattern: String,
    pub words: Vec<String>,
    pub rhyme_type: RhymeType,
    pub difficulty: Difficulty,
    pub significance: f32,
}

impl RhymeGroup {
    /// Distinct member words in first-seen order
    pub fn unique_words(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.words.len());
        for w in &self.words {
            if !out.contains(&w.as_str()) {
                out.push(w);
            }
        }
        out
    }

    /// Tiles this group contributes (two per word slot)
    pub fn tile_count(&self) -> usize {
        self.words.len() * 2
    }
}

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridDimensions {
    pub width: u8,
    pub height: u8,
    pub layers: u8,
}

/// Where a puzzle's words came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PuzzleSource {
    #[default]
    Curated,
    Custom,
    Fallback,
}

impl PuzzleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleSource::Curated => "curated",
            PuzzleSource::Custom => "custom",
            PuzzleSource::Fallback => "fallback",
        }
    }
}

/// Generation bookkeeping attached to a puzzle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PuzzleMetadata {
    pub difficulty: Difficulty,
    pub group_count: usize,
    /// Words on the board, one per tile
    pub total_words: usize,
    pub complexity: Complexity,
    pub source: PuzzleSource,
    pub fallback_used: bool,
    pub fallback_reason: Option<String>,
    pub supplemented: bool,
    /// Tiles added from the curated vocabulary
    pub supplement_count: usize,
    pub low_confidence: bool,
}

/// A complete generated puzzle
#[derive(Debug, Clone, PartialEq)]
pub struct RhymeMahjongPuzzle {
    pub id: String,
    pub source_text: String,
    pub tiles: Vec<RhymeTile>,
    pub groups: Vec<RhymeGroup>,
    pub grid: GridDimensions,
    /// Always even
    pub total_tiles: usize,
    pub layout: LayoutKind,
    pub metadata: PuzzleMetadata,
}

impl RhymeMahjongPuzzle {
    pub fn tile(&self, id: TileId) -> Option<&RhymeTile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&RhymeGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}

/// Player actions applied by front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the board cursor one row up
    CursorUp,
    /// Move the board cursor one row down
    CursorDown,
    /// Move the board cursor one column left
    CursorLeft,
    /// Move the board cursor one column right
    CursorRight,
    /// Select (or deselect) the topmost tile under the cursor
    Select,
    /// Ask for a hint
    Hint,
    /// Restart the session with the same puzzle
    Reset,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use rhyme_mahjong_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("hint"), Some(GameAction::Hint));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "hint" => Some(GameAction::Hint),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Hint => "hint",
            GameAction::Reset => "reset",
        }
    }
}
