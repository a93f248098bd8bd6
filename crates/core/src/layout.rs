//! Layout module - stacked board templates and tile placement
//!
//! Templates are ASCII grids, one per layer, bottom layer first. A `#` marks a
//! legal tile position; anything else is empty. Positions are enumerated layer
//! by layer, then row by row, then column by column, and tiles fill them in
//! that order. Lower layers therefore fill before anything is stacked on them.
//!
//! Geometry is a pure function of the logical position and [`LayoutConfig`]:
//!
//! ```text
//! x = offset_x + col * (tile_width + gap)  + layer * layer_offset.x
//! y = offset_y + row * (tile_height + gap) + layer * layer_offset.y
//! z =                                        layer * layer_offset.z
//! ```
//!
//! where `offset_x`/`offset_y` center the bottom layer in the container.

use thiserror::Error;
use tracing::{debug, warn};

use crate::exposure::{self, recompute_exposure};
use crate::rng::RandomSource;
use crate::scoring::tiles_match;
use crate::types::{
    GridDimensions, GroupId, LayoutKind, PuzzleMetadata, RhymeGroup, RhymeMahjongPuzzle,
    RhymeTile, RhymeType, TileId, TilePosition, VisualPosition,
};

/// Shuffles tried before settling for an arrangement that greedy play cannot clear
const SHUFFLE_ATTEMPTS: usize = 64;

const SIMPLE: &[&[&str]] = &[
    &["######", "######", "######"],
    &[".####.", ".####.", "......"],
];

const PYRAMID: &[&[&str]] = &[
    &["######", "######", "######", "######"],
    &["......", ".####.", ".####.", "......"],
    &["......", "..##..", "..##..", "......"],
    &["......", "..##..", "......", "......"],
];

const TURTLE: &[&[&str]] = &[
    &[".######.", "########", "########", ".######."],
    &["........", "..####..", "..####..", "........"],
    &["........", "...##...", "...##...", "........"],
    &["........", "...##...", "........", "........"],
];

/// ASCII layers of a template, bottom layer first
pub fn template(kind: LayoutKind) -> &'static [&'static [&'static str]] {
    match kind {
        LayoutKind::Simple => SIMPLE,
        LayoutKind::Pyramid => PYRAMID,
        LayoutKind::Turtle => TURTLE,
    }
}

/// Legal positions of a template in placement order
pub fn legal_positions(kind: LayoutKind) -> Vec<TilePosition> {
    let mut out = Vec::new();
    for (layer, rows) in template(kind).iter().enumerate() {
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    out.push(TilePosition::new(row as u8, col as u8, layer as u8));
                }
            }
        }
    }
    out
}

/// Number of tiles a template can hold
pub fn capacity(kind: LayoutKind) -> usize {
    template(kind)
        .iter()
        .flat_map(|rows| rows.iter())
        .map(|line| line.chars().filter(|&c| c == '#').count())
        .sum()
}

/// Grid dimensions of a template
pub fn grid_dimensions(kind: LayoutKind) -> GridDimensions {
    let layers = template(kind);
    let height = layers.iter().map(|rows| rows.len()).max().unwrap_or(0);
    let width = layers
        .iter()
        .flat_map(|rows| rows.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    GridDimensions {
        width: width as u8,
        height: height as u8,
        layers: layers.len() as u8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("no words to place")]
    Empty,
}

/// Pixel geometry for tile placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub tile_width: i32,
    pub tile_height: i32,
    pub gap: i32,
    pub container_width: i32,
    pub container_height: i32,
    /// Offset added once per layer to fake depth
    pub layer_offset: VisualPosition,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tile_width: 60,
            tile_height: 80,
            gap: 4,
            container_width: 960,
            container_height: 720,
            layer_offset: VisualPosition { x: -4, y: -4, z: 12 },
        }
    }
}

struct TileSeed {
    word: String,
    group: GroupId,
    rhyme_type: RhymeType,
}

/// Places rhyme groups on a stacked board and answers geometry/exposure queries.
#[derive(Debug, Clone, Default)]
pub struct StackedLayoutGenerator {
    config: LayoutConfig,
}

impl StackedLayoutGenerator {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place every word of `groups` as two tiles on the `kind` template.
    ///
    /// Tiles are shuffled, then fill legal positions in order. A shuffle that
    /// greedy play cannot clear is rolled again, up to a bounded number of
    /// attempts. If the template is too small, whole word pairs are dropped
    /// from the end (last groups first) so the tile count stays even.
    pub fn generate_mahjong_layout<R: RandomSource>(
        &self,
        groups: &[RhymeGroup],
        kind: LayoutKind,
        rng: &mut R,
    ) -> Result<RhymeMahjongPuzzle, LayoutError> {
        let positions = legal_positions(kind);
        let max_pairs = positions.len() / 2;

        let mut placed_groups: Vec<RhymeGroup> = Vec::with_capacity(groups.len());
        let mut pairs = 0usize;
        for group in groups {
            let room = max_pairs.saturating_sub(pairs);
            if room == 0 {
                break;
            }
            let mut g = group.clone();
            g.words.truncate(room);
            pairs += g.words.len();
            if !g.words.is_empty() {
                placed_groups.push(g);
            }
        }

        let requested: usize = groups.iter().map(|g| g.words.len()).sum();
        if requested > pairs {
            warn!(
                layout = kind.as_str(),
                requested_tiles = requested * 2,
                capacity = positions.len(),
                "layout too small, dropping word pairs"
            );
        }
        if pairs == 0 {
            return Err(LayoutError::Empty);
        }

        let mut seeds: Vec<TileSeed> = Vec::with_capacity(pairs * 2);
        for g in &placed_groups {
            for word in &g.words {
                for _ in 0..2 {
                    seeds.push(TileSeed {
                        word: word.clone(),
                        group: g.id,
                        rhyme_type: g.rhyme_type,
                    });
                }
            }
        }

        let grid = grid_dimensions(kind);
        let mut attempts = 1;
        let tiles = loop {
            rng.shuffle(&mut seeds);
            let tiles = self.place(&seeds, &positions, grid);
            if is_clearable(&tiles) {
                break tiles;
            }
            if attempts == SHUFFLE_ATTEMPTS {
                warn!(
                    layout = kind.as_str(),
                    attempts,
                    "no clearable arrangement found, keeping the last shuffle"
                );
                break tiles;
            }
            attempts += 1;
        };

        let total_tiles = tiles.len();
        debug!(
            layout = kind.as_str(),
            total_tiles,
            exposed = tiles.iter().filter(|t| t.is_exposed).count(),
            "layout generated"
        );

        Ok(RhymeMahjongPuzzle {
            id: format!("puzzle-{:08x}", rng.next_u32()),
            source_text: String::new(),
            tiles,
            groups: placed_groups,
            grid,
            total_tiles,
            layout: kind,
            metadata: PuzzleMetadata::default(),
        })
    }

    /// Tiles for `seeds` on the first `seeds.len()` positions, exposure computed
    fn place(
        &self,
        seeds: &[TileSeed],
        positions: &[TilePosition],
        grid: GridDimensions,
    ) -> Vec<RhymeTile> {
        let mut tiles: Vec<RhymeTile> = seeds
            .iter()
            .zip(positions.iter())
            .enumerate()
            .map(|(i, (seed, &pos))| {
                let mut tile = RhymeTile::new(
                    i as TileId,
                    seed.word.clone(),
                    seed.group,
                    seed.rhyme_type,
                    pos,
                );
                tile.visual = self.visual_position(pos, grid);
                tile
            })
            .collect();
        recompute_exposure(&mut tiles);
        tiles
    }

    /// Derived pixel position of a logical position
    pub fn visual_position(&self, pos: TilePosition, grid: GridDimensions) -> VisualPosition {
        let c = &self.config;
        let cols = grid.width as i32;
        let rows = grid.height as i32;
        let grid_w = cols * c.tile_width + (cols - 1).max(0) * c.gap;
        let grid_h = rows * c.tile_height + (rows - 1).max(0) * c.gap;
        let offset_x = (c.container_width - grid_w) / 2;
        let offset_y = (c.container_height - grid_h) / 2;
        let layer = pos.layer as i32;

        VisualPosition {
            x: offset_x + pos.col as i32 * (c.tile_width + c.gap) + layer * c.layer_offset.x,
            y: offset_y + pos.row as i32 * (c.tile_height + c.gap) + layer * c.layer_offset.y,
            z: layer * c.layer_offset.z,
        }
    }

    /// CSS-style transform for rendering a tile
    pub fn get_tile_transform(&self, tile: &RhymeTile, grid: GridDimensions) -> String {
        let v = self.visual_position(tile.position, grid);
        format!("translate3d({}px, {}px, {}px)", v.x, v.y, v.z)
    }

    /// Mark `ids` removed and recompute exposure over the whole board.
    ///
    /// Returns the tiles that became exposed.
    pub fn remove_tiles(&self, tiles: &mut [RhymeTile], ids: &[TileId]) -> Vec<TileId> {
        for tile in tiles.iter_mut().filter(|t| ids.contains(&t.id)) {
            tile.is_removed = true;
            tile.is_selected = false;
        }
        recompute_exposure(tiles)
    }

    /// Whether two tiles could be matched (same rule as the matching engine)
    pub fn can_match(a: &RhymeTile, b: &RhymeTile) -> bool {
        tiles_match(a, b)
    }

    /// Exposed, present tile pairs that match right now
    pub fn available_pairs(tiles: &[RhymeTile]) -> Vec<(TileId, TileId)> {
        let open: Vec<&RhymeTile> = tiles.iter().filter(|t| t.is_live() && t.is_exposed).collect();
        let mut out = Vec::new();
        for (i, a) in open.iter().enumerate() {
            for b in &open[i + 1..] {
                if Self::can_match(a, b) {
                    out.push((a.id, b.id));
                }
            }
        }
        out
    }

    /// Check the exposure invariant for a board
    pub fn exposure_is_consistent(tiles: &[RhymeTile]) -> bool {
        exposure::is_consistent(tiles)
    }
}

/// Whether repeatedly removing the first available pair clears the board
pub fn is_clearable(tiles: &[RhymeTile]) -> bool {
    let mut board = tiles.to_vec();
    loop {
        if board.iter().all(|t| t.is_removed) {
            return true;
        }
        let Some(&(a, b)) = StackedLayoutGenerator::available_pairs(&board).first() else {
            return false;
        };
        for tile in board.iter_mut().filter(|t| t.id == a || t.id == b) {
            tile.is_removed = true;
        }
        recompute_exposure(&mut board);
    }
}
