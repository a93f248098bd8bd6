//! Scoring module - match validation, points and star rating
//!
//! Rules:
//! - Two tiles match iff they are distinct and share a rhyme group.
//! - A match is `exact` only when both tiles carry an exact rhyme, else `slant`.
//! - Star rating looks at hints first; mistakes only matter for hint-free sessions.

use crate::types::{
    RhymeTile, RhymeType, TileId, EXACT_MATCH_POINTS, SLANT_MATCH_POINTS,
};

/// Result of validating a candidate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub tiles: [TileId; 2],
    pub is_valid: bool,
    /// `None` when the pair is invalid
    pub match_type: Option<RhymeType>,
    pub points: u32,
}

/// Points awarded for a match of the given type
pub fn match_points(match_type: RhymeType) -> u32 {
    match match_type {
        RhymeType::Exact => EXACT_MATCH_POINTS,
        RhymeType::Slant => SLANT_MATCH_POINTS,
    }
}

/// Whether two tiles form a matching pair (group membership).
///
/// Symmetric in its arguments.
pub fn tiles_match(a: &RhymeTile, b: &RhymeTile) -> bool {
    a.id != b.id && a.rhyme_group == b.rhyme_group
}

/// Validate a candidate pair and price it.
pub fn validate_match(a: &RhymeTile, b: &RhymeTile) -> MatchResult {
    if !tiles_match(a, b) {
        return MatchResult {
            tiles: [a.id, b.id],
            is_valid: false,
            match_type: None,
            points: 0,
        };
    }

    let match_type = if a.rhyme_type == RhymeType::Exact && b.rhyme_type == RhymeType::Exact {
        RhymeType::Exact
    } else {
        RhymeType::Slant
    };

    MatchResult {
        tiles: [a.id, b.id],
        is_valid: true,
        match_type: Some(match_type),
        points: match_points(match_type),
    }
}

/// Star rating (0-3).
///
/// Precedence: two or more hints give 0 stars regardless of mistakes; exactly
/// one hint gives 1 star; otherwise mistakes decide (0 → 3, ≤2 → 2, 3 → 1, more → 0).
pub fn calculate_star_rating(mistakes: u32, hints_used: u32) -> u8 {
    if hints_used >= 2 {
        return 0;
    }
    if hints_used == 1 {
        return 1;
    }
    match mistakes {
        0 => 3,
        1..=2 => 2,
        3 => 1,
        _ => 0,
    }
}

/// Completion percentage from the number of matched tiles.
pub fn calculate_progress(matched_tiles: usize, total_tiles: usize) -> u8 {
    if total_tiles == 0 {
        return 100;
    }
    let pct = (matched_tiles.min(total_tiles) * 100 + total_tiles / 2) / total_tiles;
    pct as u8
}
