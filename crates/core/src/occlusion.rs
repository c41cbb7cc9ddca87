//! Occlusion module - which tiles can currently be picked
//!
//! A tile is blocked when it is covered or flanked:
//!
//! - **Covered**: another unmatched tile on a strictly higher layer sits within one row
//!   and one column of it.
//! - **Flanked**: unmatched tiles sit directly left *and* right of it on the same layer
//!   and row. One side alone never blocks.
//!
//! Blocked status is derived from the rest of the board. It is never edited by hand;
//! call [`recompute_blocked`] after anything that matches or moves tiles.

use crate::board::Tile;
use crate::types::Position;

/// Grid distance along one axis, without `i8` overflow at the extremes
fn axis_distance(a: i8, b: i8) -> i16 {
    (i16::from(a) - i16::from(b)).abs()
}

fn is_covered(target: &Position, others: &[Tile]) -> bool {
    others.iter().any(|t| {
        !t.is_matched
            && t.position.layer > target.layer
            && axis_distance(t.position.row, target.row) <= 1
            && axis_distance(t.position.column, target.column) <= 1
    })
}

fn is_flanked(target: &Position, others: &[Tile]) -> bool {
    let neighbour_at = |column: i8| {
        others.iter().any(|t| {
            !t.is_matched
                && t.position.layer == target.layer
                && t.position.row == target.row
                && t.position.column == column
        })
    };
    // A slot at the edge of the coordinate range has no neighbour on that side.
    let left = target.column.checked_sub(1).is_some_and(&neighbour_at);
    let right = target.column.checked_add(1).is_some_and(&neighbour_at);
    left && right
}

/// Whether `tile` is blocked given the board it lives on
///
/// Matched tiles are never blocked.
pub fn is_blocked(tile: &Tile, tiles: &[Tile]) -> bool {
    if tile.is_matched {
        return false;
    }
    // A tile never covers or flanks itself: the layer and column tests exclude its own slot.
    is_covered(&tile.position, tiles) || is_flanked(&tile.position, tiles)
}

/// Refresh `is_blocked` on every tile
pub fn recompute_blocked(tiles: &mut [Tile]) {
    let blocked: Vec<bool> = tiles.iter().map(|t| is_blocked(t, tiles)).collect();
    for (tile, blocked) in tiles.iter_mut().zip(blocked) {
        tile.is_blocked = blocked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dragon, TileFace, TileId};

    fn tile(id: u32, row: i8, column: i8, layer: u8) -> Tile {
        Tile::new(
            TileId(id),
            TileFace::Dragon(Dragon::White),
            Position::new(row, column, layer),
        )
    }

    fn blocked_ids(tiles: &[Tile]) -> Vec<u32> {
        tiles
            .iter()
            .filter(|t| t.is_blocked)
            .map(|t| t.id.0)
            .collect()
    }

    #[test]
    fn test_lone_tile_is_free() {
        let mut tiles = vec![tile(0, 0, 0, 0)];
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_row_of_three_blocks_middle() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 0, 1, 0), tile(2, 0, 2, 0)];
        recompute_blocked(&mut tiles);
        assert_eq!(blocked_ids(&tiles), vec![1]);
    }

    #[test]
    fn test_single_neighbour_never_blocks() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 0, 1, 0)];
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_flank_requires_same_row_and_layer() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 1, 1, 0), tile(2, 0, 2, 0)];
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_covered_by_higher_layer_neighbourhood() {
        // Tile on layer 1 sits diagonally over (0, 0)
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 1, 1, 1)];
        recompute_blocked(&mut tiles);
        assert_eq!(blocked_ids(&tiles), vec![0]);
    }

    #[test]
    fn test_cover_out_of_reach() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 2, 0, 1)];
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_lower_layer_never_covers() {
        let mut tiles = vec![tile(0, 0, 0, 1), tile(1, 0, 0, 0)];
        recompute_blocked(&mut tiles);
        assert_eq!(blocked_ids(&tiles), vec![1]);
    }

    #[test]
    fn test_matched_tiles_release_neighbours() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 0, 1, 0), tile(2, 0, 2, 0)];
        tiles[0].is_matched = true;
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_matched_cover_releases_tile() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 0, 0, 1)];
        tiles[1].is_matched = true;
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_matched_tile_is_never_blocked() {
        let mut tiles = vec![tile(0, 0, 0, 0), tile(1, 0, 1, 0), tile(2, 0, 2, 0)];
        tiles[1].is_matched = true;
        tiles[1].is_blocked = true;
        recompute_blocked(&mut tiles);
        assert!(!tiles[1].is_blocked);
    }

    #[test]
    fn test_coordinate_extremes_do_not_wrap() {
        let mut tiles = vec![
            tile(0, 0, i8::MAX - 1, 0),
            tile(1, 0, i8::MAX, 0),
            tile(2, 0, i8::MIN, 0),
        ];
        recompute_blocked(&mut tiles);
        // The tile at column 127 has only a left neighbour; column -128 is far away
        assert!(blocked_ids(&tiles).is_empty());
    }

    #[test]
    fn test_far_apart_rows_across_layers() {
        let mut tiles = vec![tile(0, -100, 0, 0), tile(1, 100, 0, 1), tile(2, i8::MIN, 0, 2)];
        recompute_blocked(&mut tiles);
        assert!(blocked_ids(&tiles).is_empty());

        let mut edge = vec![tile(0, i8::MAX, i8::MIN, 0), tile(1, i8::MAX, i8::MIN, 1)];
        recompute_blocked(&mut edge);
        assert_eq!(blocked_ids(&edge), vec![0]);
    }
}
