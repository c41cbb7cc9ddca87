//! Matching module - pair validity and available-move search
//!
//! Two tiles match when both are playable and show the same face. Flowers match any
//! flower and seasons match any season.
//!
//! The move search is a plain pairwise scan over the playable tiles. Boards hold at most
//! a few hundred tiles, so it is recomputed after every mutation instead of being
//! maintained incrementally.

use crate::board::Tile;
use crate::types::TileId;

/// Whether the faces alone allow a pair
pub fn faces_match(a: &Tile, b: &Tile) -> bool {
    let (ca, cb) = (a.category(), b.category());
    if ca.is_wildcard() && ca == cb {
        return true;
    }
    a.face == b.face
}

/// Whether `a` and `b` can be removed together right now
pub fn can_match(a: &Tile, b: &Tile) -> bool {
    if a.id == b.id || !a.is_playable() || !b.is_playable() {
        return false;
    }
    faces_match(a, b)
}

/// Every matchable pair, each unordered pair once, in board order
pub fn find_available_matches(tiles: &[Tile]) -> Vec<(TileId, TileId)> {
    let playable: Vec<&Tile> = tiles.iter().filter(|t| t.is_playable()).collect();

    let mut pairs = Vec::new();
    for (i, a) in playable.iter().enumerate() {
        for b in &playable[i + 1..] {
            if can_match(a, b) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}

/// Whether at least one pair is available (stops at the first one)
pub fn has_available_match(tiles: &[Tile]) -> bool {
    let playable: Vec<&Tile> = tiles.iter().filter(|t| t.is_playable()).collect();
    playable
        .iter()
        .enumerate()
        .any(|(i, a)| playable[i + 1..].iter().any(|b| can_match(a, b)))
}
