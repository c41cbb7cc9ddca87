//! Board module - the tile record and the board builder
//!
//! A board is a flat `Vec<Tile>` in deal order. Tiles never reference each other;
//! neighbours are found by scanning coordinates, so the whole board is a plain value
//! that can be cloned for snapshots.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::layout::LayoutTemplate;
use crate::occlusion::recompute_blocked;
use crate::tileset::tile_set_for_slots;
use crate::types::{Position, TileCategory, TileFace, TileId};

/// A single tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub face: TileFace,
    pub position: Position,
    /// Pixel x, derived from `position`
    pub x: i32,
    /// Pixel y, derived from `position`
    pub y: i32,
    pub is_selected: bool,
    pub is_matched: bool,
    pub is_blocked: bool,
}

impl Tile {
    /// Create an unplayed tile at a slot
    pub fn new(id: TileId, face: TileFace, position: Position) -> Self {
        let (x, y) = position.pixel();
        Self {
            id,
            face,
            position,
            x,
            y,
            is_selected: false,
            is_matched: false,
            is_blocked: false,
        }
    }

    pub fn category(&self) -> TileCategory {
        self.face.category()
    }

    pub fn row(&self) -> i8 {
        self.position.row
    }

    pub fn column(&self) -> i8 {
        self.position.column
    }

    pub fn layer(&self) -> u8 {
        self.position.layer
    }

    /// Move the tile to another slot, keeping pixel coordinates in sync
    pub fn place(&mut self, position: Position) {
        let (x, y) = position.pixel();
        self.position = position;
        self.x = x;
        self.y = y;
    }

    /// Still on the table and not covered or flanked
    pub fn is_playable(&self) -> bool {
        !self.is_matched && !self.is_blocked
    }
}

/// Bind faces to slots in order, without shuffling
///
/// Faces are reused from the start when there are fewer faces than slots. Ids are
/// assigned `0..n` in slot order. Blocked flags are computed before returning.
pub fn bind_faces(positions: &[Position], faces: &[TileFace]) -> Vec<Tile> {
    if faces.is_empty() {
        return Vec::new();
    }

    let mut tiles: Vec<Tile> = positions
        .iter()
        .zip(faces.iter().cycle())
        .enumerate()
        .map(|(i, (&position, &face))| Tile::new(TileId(i as u32), face, position))
        .collect();

    recompute_blocked(&mut tiles);
    tiles
}

/// Deal a fresh board onto a layout
///
/// Two draws from `rng`: the pair shuffle inside [`tile_set_for_slots`] picks which pairs
/// the layout gets, and the face shuffle here places them on slots.
pub fn build_board<R: Rng + ?Sized>(layout: &LayoutTemplate, rng: &mut R) -> Vec<Tile> {
    let mut faces = tile_set_for_slots(layout.len(), rng);
    faces.shuffle(rng);
    bind_faces(layout.positions(), &faces)
}
