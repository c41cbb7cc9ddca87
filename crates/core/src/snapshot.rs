use crate::board::Tile;
use crate::types::{Difficulty, TileId};

/// Read-only copy of a session for hosts
///
/// Hosts render from snapshots and never touch the live tile list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub game_id: u32,
    pub difficulty: Difficulty,
    pub tiles: Vec<Tile>,
    pub selected: Option<TileId>,
    pub moves: u32,
    pub score: u32,
    pub hints_used: u32,
    pub time_elapsed_seconds: u32,
    pub is_complete: bool,
    pub is_game_over: bool,
    pub can_shuffle: bool,
    /// Unmatched tiles
    pub remaining: usize,
    /// Number of pairs that could be matched right now
    pub available_matches: usize,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self {
            tiles: std::mem::take(&mut self.tiles),
            ..Self::default()
        };
        self.tiles.clear();
    }

    pub fn playable(&self) -> bool {
        !self.is_complete && !self.is_game_over
    }
}
