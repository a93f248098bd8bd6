//! Exposure model - which tiles may be selected
//!
//! A tile on the board is blocked by every remaining tile on any higher layer
//! whose row and column each differ by at most one. A tile is exposed iff its
//! blocker list is empty. Removed tiles carry no blockers and are never exposed.
//!
//! Recomputation is always a full pass over the board. Boards hold at most a
//! few dozen tiles, so the quadratic scan is not a concern.

use crate::types::{RhymeTile, TileId, TilePosition};

/// Whether a tile at `upper` covers a tile at `lower`
#[inline]
pub fn covers(upper: &TilePosition, lower: &TilePosition) -> bool {
    upper.layer > lower.layer && lower.overlaps(upper)
}

/// Ids of the remaining tiles blocking `tiles[index]`, ascending
pub fn blockers_of(tiles: &[RhymeTile], index: usize) -> Vec<TileId> {
    let target = &tiles[index];
    let mut out: Vec<TileId> = tiles
        .iter()
        .filter(|t| !t.is_removed && t.id != target.id && covers(&t.position, &target.position))
        .map(|t| t.id)
        .collect();
    out.sort_unstable();
    out
}

/// Recompute `blocked_by` / `is_exposed` for every tile.
///
/// Returns the ids of tiles that flipped from blocked to exposed.
pub fn recompute_exposure(tiles: &mut [RhymeTile]) -> Vec<TileId> {
    let mut newly_exposed = Vec::new();

    for i in 0..tiles.len() {
        if tiles[i].is_removed {
            let tile = &mut tiles[i];
            tile.blocked_by.clear();
            tile.is_exposed = false;
            continue;
        }

        let blockers = blockers_of(tiles, i);
        let tile = &mut tiles[i];
        let was_exposed = tile.is_exposed;
        tile.is_exposed = blockers.is_empty();
        tile.blocked_by = blockers;

        if tile.is_exposed && !was_exposed {
            newly_exposed.push(tile.id);
        }
    }

    newly_exposed
}

/// Check the exposure invariant without mutating anything.
pub fn is_consistent(tiles: &[RhymeTile]) -> bool {
    (0..tiles.len()).all(|i| {
        let t = &tiles[i];
        if t.is_removed {
            return t.blocked_by.is_empty() && !t.is_exposed;
        }
        let expected = blockers_of(tiles, i);
        t.blocked_by == expected && t.is_exposed == expected.is_empty()
    })
}
