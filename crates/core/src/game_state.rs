//! Game state module - manages one game session
//!
//! This module ties together all core components: layout, board, occlusion, matching,
//! scoring and the random source. It owns the selection state machine and the session
//! counters.
//!
//! Selection has two states: nothing selected, or exactly one tile selected. A click on
//! a second tile either matches the pair or moves the selection to the new tile; there
//! is no penalty for a mismatched pick.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::board::{build_board, Tile};
use crate::layout::layout_for;
use crate::matching::{can_match, find_available_matches, has_available_match};
use crate::occlusion::recompute_blocked;
use crate::rng::SimpleRng;
use crate::scoring::{add_match_points, final_score};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    tiles: Vec<Tile>,
    /// Slot list used when the remaining tiles are reshuffled
    layout: Vec<Position>,
    selected: ArrayVec<TileId, 1>,
    /// Monotonic game id (increments on every new game).
    game_id: u32,
    difficulty: Difficulty,
    moves: u32,
    score: u32,
    hints_used: u32,
    time_elapsed_seconds: u32,
    is_complete: bool,
    is_game_over: bool,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Deal a new game with the default seeded RNG
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        Self::with_rng(difficulty, SimpleRng::new(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Deal a new game drawing randomness from `rng`
    pub fn with_rng(difficulty: Difficulty, mut rng: R) -> Self {
        let layout = layout_for(difficulty);
        let tiles = build_board(layout, &mut rng);
        info!(
            difficulty = difficulty.as_str(),
            tiles = tiles.len(),
            "new game dealt"
        );

        let mut state = Self {
            tiles,
            layout: layout.positions().to_vec(),
            selected: ArrayVec::new(),
            game_id: 0,
            difficulty,
            moves: 0,
            score: 0,
            hints_used: 0,
            time_elapsed_seconds: 0,
            is_complete: false,
            is_game_over: false,
            rng,
        };
        state.refresh_terminal_flags();
        state
    }

    /// Start a session from a prepared board (custom layouts, tests)
    ///
    /// The tiles' own positions become the reshuffle slot list. Flags other than
    /// `is_matched` are recomputed.
    pub fn from_tiles(difficulty: Difficulty, mut tiles: Vec<Tile>, rng: R) -> Self {
        for tile in &mut tiles {
            tile.is_selected = false;
        }
        recompute_blocked(&mut tiles);
        let layout = tiles.iter().map(|t| t.position).collect();

        let mut state = Self {
            tiles,
            layout,
            selected: ArrayVec::new(),
            game_id: 0,
            difficulty,
            moves: 0,
            score: 0,
            hints_used: 0,
            time_elapsed_seconds: 0,
            is_complete: false,
            is_game_over: false,
            rng,
        };
        state.refresh_terminal_flags();
        state
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Ids of the selected tiles (zero or one)
    pub fn selected_tiles(&self) -> &[TileId] {
        &self.selected
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.first().and_then(|&id| self.tile(id))
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn time_elapsed_seconds(&self) -> u32 {
        self.time_elapsed_seconds
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Tiles still on the table
    pub fn remaining_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_matched).count()
    }

    /// Every pair that could be matched right now
    pub fn available_matches(&self) -> Vec<(TileId, TileId)> {
        find_available_matches(&self.tiles)
    }

    /// Shuffling is only offered when the board is stuck
    pub fn can_shuffle(&self) -> bool {
        !self.is_complete && !has_available_match(&self.tiles)
    }

    fn index_of(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == id)
    }

    fn select(&mut self, idx: usize) {
        self.clear_selection();
        self.tiles[idx].is_selected = true;
        self.selected.push(self.tiles[idx].id);
    }

    fn clear_selection(&mut self) {
        for tile in &mut self.tiles {
            tile.is_selected = false;
        }
        self.selected.clear();
    }

    fn refresh_terminal_flags(&mut self) {
        self.is_complete = self.tiles.iter().all(|t| t.is_matched);
        self.is_game_over = !self.is_complete && !has_available_match(&self.tiles);
    }

    /// Click a tile
    ///
    /// Returns false when the click changed nothing: unknown id, blocked or matched tile.
    pub fn click_tile(&mut self, id: TileId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if !self.tiles[idx].is_playable() {
            return false;
        }

        let previous = self
            .selected
            .first()
            .copied()
            .and_then(|sid| self.index_of(sid));

        match previous {
            None => self.select(idx),
            Some(prev) if prev == idx => self.clear_selection(),
            Some(prev) => {
                if can_match(&self.tiles[prev], &self.tiles[idx]) {
                    self.apply_match(prev, idx);
                } else {
                    self.select(idx);
                }
            }
        }
        true
    }

    fn apply_match(&mut self, first: usize, second: usize) {
        self.tiles[first].is_matched = true;
        self.tiles[second].is_matched = true;
        self.clear_selection();
        recompute_blocked(&mut self.tiles);

        self.moves = self.moves.saturating_add(1);
        self.refresh_terminal_flags();

        if self.is_complete {
            // The completion score replaces the running total.
            self.score = final_score(self.moves, self.time_elapsed_seconds, self.hints_used);
            info!(
                moves = self.moves,
                seconds = self.time_elapsed_seconds,
                hints = self.hints_used,
                score = self.score,
                "board cleared"
            );
        } else {
            self.score = add_match_points(self.score);
            debug!(
                first = %self.tiles[first].id,
                second = %self.tiles[second].id,
                face = %self.tiles[first].face,
                moves = self.moves,
                score = self.score,
                "pair matched"
            );
            if self.is_game_over {
                info!(remaining = self.remaining_tiles(), "no moves left");
            }
        }
    }

    /// Pick one available pair at random for the host to highlight
    ///
    /// Returns None (and uses no hint) when no pair is available.
    pub fn show_hint(&mut self) -> Option<(TileId, TileId)> {
        let pairs = find_available_matches(&self.tiles);
        if pairs.is_empty() {
            return None;
        }
        let pair = pairs[self.rng.random_range(0..pairs.len())];
        self.hints_used = self.hints_used.saturating_add(1);
        debug!(first = %pair.0, second = %pair.1, hints = self.hints_used, "hint shown");
        Some(pair)
    }

    /// Move the remaining tiles onto random layout slots
    ///
    /// No-op unless [`can_shuffle`](Self::can_shuffle). Up to `SHUFFLE_ATTEMPTS`
    /// arrangements are tried until one leaves a pair open; if none does the last one
    /// stays and the board remains game over.
    pub fn shuffle(&mut self) -> bool {
        if !self.can_shuffle() {
            return false;
        }

        let unmatched: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| !self.tiles[i].is_matched)
            .collect();
        let mut slots = self.layout.clone();

        let mut attempts = 0;
        while attempts < SHUFFLE_ATTEMPTS {
            attempts += 1;
            slots.shuffle(&mut self.rng);
            for (&idx, &slot) in unmatched.iter().zip(slots.iter()) {
                self.tiles[idx].place(slot);
            }
            recompute_blocked(&mut self.tiles);
            if has_available_match(&self.tiles) {
                break;
            }
        }

        self.clear_selection();
        self.refresh_terminal_flags();
        info!(
            attempts,
            remaining = unmatched.len(),
            stuck = self.is_game_over,
            "board shuffled"
        );
        true
    }

    /// Throw the board away and deal a new one
    pub fn new_game(&mut self, difficulty: Difficulty) {
        let layout = layout_for(difficulty);
        self.tiles = build_board(layout, &mut self.rng);
        self.layout = layout.positions().to_vec();
        self.selected.clear();
        self.game_id = self.game_id.wrapping_add(1);
        self.difficulty = difficulty;
        self.moves = 0;
        self.score = 0;
        self.hints_used = 0;
        self.time_elapsed_seconds = 0;
        self.refresh_terminal_flags();
        info!(
            difficulty = difficulty.as_str(),
            tiles = self.tiles.len(),
            game_id = self.game_id,
            "new game dealt"
        );
    }

    /// One second of play time; ignored once the game has ended
    pub fn tick(&mut self) -> bool {
        if self.is_complete || self.is_game_over {
            return false;
        }
        self.time_elapsed_seconds = self.time_elapsed_seconds.saturating_add(1);
        true
    }

    /// Apply a host action
    ///
    /// Returns whether the session changed. A hint that finds a pair counts as a change
    /// (the hint counter moved).
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Click(id) => self.click_tile(id),
            GameAction::Hint => self.show_hint().is_some(),
            GameAction::Shuffle => self.shuffle(),
            GameAction::NewGame(difficulty) => {
                self.new_game(difficulty);
                true
            }
            GameAction::Tick => self.tick(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tiles.clear();
        out.tiles.extend_from_slice(&self.tiles);
        out.game_id = self.game_id;
        out.difficulty = self.difficulty;
        out.selected = self.selected.first().copied();
        out.moves = self.moves;
        out.score = self.score;
        out.hints_used = self.hints_used;
        out.time_elapsed_seconds = self.time_elapsed_seconds;
        out.is_complete = self.is_complete;
        out.is_game_over = self.is_game_over;
        out.can_shuffle = self.can_shuffle();
        out.remaining = self.remaining_tiles();
        out.available_matches = find_available_matches(&self.tiles).len();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(Difficulty::Rookie, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bind_faces;
    use std::collections::HashMap;

    fn face(rank: u8) -> TileFace {
        TileFace::Suited(Suit::Circles, rank)
    }

    /// 2x2 flat board: ids 0/1 on row 0, 2/3 on row 1
    fn two_by_two(faces: [TileFace; 4]) -> GameState {
        let positions = [
            Position::new(0, 0, 0),
            Position::new(0, 1, 0),
            Position::new(1, 0, 0),
            Position::new(1, 1, 0),
        ];
        GameState::from_tiles(
            Difficulty::Rookie,
            bind_faces(&positions, &faces),
            SimpleRng::new(1),
        )
    }

    /// Row of three: the middle tile is flanked
    fn row_of_three(faces: [TileFace; 3]) -> GameState {
        let positions = [
            Position::new(0, 0, 0),
            Position::new(0, 1, 0),
            Position::new(0, 2, 0),
        ];
        GameState::from_tiles(
            Difficulty::Rookie,
            bind_faces(&positions, &faces),
            SimpleRng::new(1),
        )
    }

    fn face_counts(tiles: &[Tile]) -> HashMap<TileFace, usize> {
        let mut map = HashMap::new();
        for t in tiles {
            *map.entry(t.face).or_insert(0) += 1;
        }
        map
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(Difficulty::Pro, 12345);

        assert_eq!(state.tiles().len(), 76);
        assert_eq!(state.difficulty(), Difficulty::Pro);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.hints_used(), 0);
        assert_eq!(state.time_elapsed_seconds(), 0);
        assert!(!state.is_complete());
        assert!(state.selected_tiles().is_empty());
        assert_eq!(state.game_id(), 0);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);

        assert!(state.click_tile(TileId(0)));
        assert_eq!(state.selected_tiles(), &[TileId(0)]);
        assert!(state.tile(TileId(0)).unwrap().is_selected);
        assert_eq!(state.selected_tile().map(|t| t.id), Some(TileId(0)));

        assert!(state.click_tile(TileId(0)));
        assert!(state.selected_tiles().is_empty());
        assert!(state.selected_tile().is_none());
        assert!(state.tiles().iter().all(|t| !t.is_selected));
    }

    #[test]
    fn test_mismatch_switches_selection() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);

        state.click_tile(TileId(0));
        state.click_tile(TileId(2));

        assert_eq!(state.selected_tiles(), &[TileId(2)]);
        assert!(!state.tile(TileId(0)).unwrap().is_selected);
        assert!(state.tile(TileId(2)).unwrap().is_selected);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_end_to_end_two_by_two() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);

        state.click_tile(TileId(0));
        state.click_tile(TileId(1));
        assert!(state.tile(TileId(0)).unwrap().is_matched);
        assert!(state.tile(TileId(1)).unwrap().is_matched);
        assert_eq!(state.moves(), 1);
        assert_eq!(state.score(), 10);
        assert!(!state.is_complete());
        assert!(!state.is_game_over());

        for _ in 0..30 {
            state.tick();
        }

        state.click_tile(TileId(2));
        state.click_tile(TileId(3));
        assert!(state.tiles().iter().all(|t| t.is_matched));
        assert!(state.is_complete());
        assert!(!state.is_game_over());
        assert_eq!(state.moves(), 2);
        assert_eq!(state.score(), final_score(2, 30, 0));
        assert_eq!(state.score(), 1566);
    }

    #[test]
    fn test_click_blocked_tile_is_noop() {
        let mut state = row_of_three([face(1), face(2), face(1)]);
        assert!(state.tile(TileId(1)).unwrap().is_blocked);

        state.click_tile(TileId(0));
        let before = state.tiles().to_vec();

        assert!(!state.click_tile(TileId(1)));
        assert_eq!(state.selected_tiles(), &[TileId(0)]);
        assert_eq!(state.tiles(), before.as_slice());
    }

    #[test]
    fn test_click_matched_tile_is_noop() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        state.click_tile(TileId(0));
        state.click_tile(TileId(1));

        assert!(!state.click_tile(TileId(0)));
        assert!(state.selected_tiles().is_empty());
    }

    #[test]
    fn test_click_unknown_tile_is_noop() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        state.click_tile(TileId(2));
        assert!(!state.click_tile(TileId(99)));
        assert_eq!(state.selected_tiles(), &[TileId(2)]);
    }

    #[test]
    fn test_match_unblocks_neighbour() {
        // Middle tile is flanked until an end tile leaves
        let mut state = row_of_three([face(1), face(2), face(1)]);
        assert!(!state.is_game_over());

        state.click_tile(TileId(0));
        state.click_tile(TileId(2));
        assert!(!state.tile(TileId(1)).unwrap().is_blocked);
        // One unmatched tile, no partner
        assert!(state.is_game_over());
        assert!(!state.is_complete());
        assert!(state.can_shuffle());
    }

    #[test]
    fn test_stuck_board_is_game_over_from_start() {
        let state = two_by_two([face(1), face(2), face(3), face(4)]);
        assert!(state.is_game_over());
        assert!(state.available_matches().is_empty());
    }

    #[test]
    fn test_hint_single_pair() {
        let mut state = two_by_two([face(1), face(1), face(2), face(3)]);

        assert_eq!(state.show_hint(), Some((TileId(0), TileId(1))));
        assert_eq!(state.hints_used(), 1);

        state.click_tile(TileId(0));
        state.click_tile(TileId(1));

        assert_eq!(state.show_hint(), None);
        assert_eq!(state.hints_used(), 1);
    }

    #[test]
    fn test_hint_is_an_available_pair() {
        let mut state = GameState::new(Difficulty::Master, 4242);
        let available = state.available_matches();
        let hint = state.show_hint();
        if available.is_empty() {
            assert_eq!(hint, None);
        } else {
            assert!(available.contains(&hint.unwrap()));
        }
    }

    #[test]
    fn test_hint_counts_toward_final_score() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        state.show_hint();
        state.click_tile(TileId(0));
        state.click_tile(TileId(1));
        state.click_tile(TileId(2));
        state.click_tile(TileId(3));
        assert_eq!(state.score(), final_score(2, 0, 1));
    }

    #[test]
    fn test_shuffle_refused_while_moves_remain() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        assert!(!state.can_shuffle());
        let before = state.tiles().to_vec();
        assert!(!state.shuffle());
        assert_eq!(state.tiles(), before.as_slice());
    }

    #[test]
    fn test_shuffle_refused_when_complete() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        for id in 0..4 {
            state.click_tile(TileId(id));
        }
        assert!(state.is_complete());
        assert!(!state.can_shuffle());
        assert!(!state.shuffle());
    }

    #[test]
    fn test_shuffle_preserves_identities_and_counters() {
        // 2 over 2: both lower tiles are covered, top row pair differs
        let positions = [
            Position::new(0, 0, 0),
            Position::new(0, 4, 0),
            Position::new(0, 0, 1),
            Position::new(0, 4, 1),
        ];
        let faces = [face(1), face(2), face(2), face(1)];
        let mut state = GameState::from_tiles(
            Difficulty::Rookie,
            bind_faces(&positions, &faces),
            SimpleRng::new(8),
        );
        assert!(state.can_shuffle());
        state.click_tile(TileId(2));

        let before = face_counts(state.tiles());
        let ids_before: Vec<_> = state.tiles().iter().map(|t| (t.id, t.face)).collect();

        assert!(state.shuffle());

        assert_eq!(face_counts(state.tiles()), before);
        let ids_after: Vec<_> = state.tiles().iter().map(|t| (t.id, t.face)).collect();
        assert_eq!(ids_before, ids_after);
        assert!(state.selected_tiles().is_empty());
        assert!(state.tiles().iter().all(|t| !t.is_selected));
        assert_eq!(state.moves(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_elapsed_seconds(), 0);
        for t in state.tiles() {
            assert_eq!((t.x, t.y), t.position.pixel());
        }
        assert_eq!(state.is_game_over(), state.available_matches().is_empty());
    }

    #[test]
    fn test_shuffle_unsticks_flanked_row() {
        // Ends differ and the middle pair is flanked
        let positions = [
            Position::new(0, 0, 0),
            Position::new(0, 1, 0),
            Position::new(0, 2, 0),
            Position::new(0, 3, 0),
        ];
        let faces = [face(1), face(2), face(1), face(2)];
        let mut state = GameState::from_tiles(
            Difficulty::Rookie,
            bind_faces(&positions, &faces),
            SimpleRng::new(3),
        );
        assert!(state.is_game_over());

        assert!(state.shuffle());
        assert_eq!(state.is_game_over(), state.available_matches().is_empty());
    }

    #[test]
    fn test_tick_suppressed_after_end() {
        let mut state = two_by_two([face(1), face(2), face(3), face(4)]);
        assert!(state.is_game_over());
        assert!(!state.tick());
        assert_eq!(state.time_elapsed_seconds(), 0);

        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        assert!(state.tick());
        for id in 0..4 {
            state.click_tile(TileId(id));
        }
        assert!(!state.tick());
        assert_eq!(state.time_elapsed_seconds(), 1);
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        state.tick();
        state.show_hint();
        state.click_tile(TileId(0));
        state.click_tile(TileId(1));
        state.click_tile(TileId(2));

        state.new_game(Difficulty::Master);

        assert_eq!(state.difficulty(), Difficulty::Master);
        assert_eq!(state.tiles().len(), 144);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.hints_used(), 0);
        assert_eq!(state.time_elapsed_seconds(), 0);
        assert!(!state.is_complete());
        assert!(state.selected_tiles().is_empty());
        assert!(state.tiles().iter().all(|t| !t.is_matched && !t.is_selected));
        assert_eq!(state.game_id(), 1);
    }

    #[test]
    fn test_apply_action() {
        let mut state = two_by_two([face(1), face(1), face(2), face(2)]);
        assert!(state.apply_action(GameAction::Tick));
        assert!(state.apply_action(GameAction::Hint));
        assert!(state.apply_action(GameAction::Click(TileId(0))));
        assert!(state.apply_action(GameAction::Click(TileId(1))));
        assert_eq!(state.moves(), 1);
        assert!(!state.apply_action(GameAction::Shuffle));
        assert!(state.apply_action(GameAction::NewGame(Difficulty::Pro)));
        assert_eq!(state.tiles().len(), 76);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut state = GameState::new(Difficulty::Rookie, 9);
        let free = state
            .tiles()
            .iter()
            .find(|t| t.is_playable())
            .map(|t| t.id)
            .unwrap();
        state.click_tile(free);

        let snap = state.snapshot();
        assert_eq!(snap.tiles.len(), 24);
        assert_eq!(snap.selected, Some(free));
        assert_eq!(snap.remaining, 24);
        assert_eq!(snap.available_matches, state.available_matches().len());
        assert_eq!(snap.can_shuffle, state.can_shuffle());
        assert_eq!(snap.playable(), !state.is_complete() && !state.is_game_over());
    }

    #[test]
    fn test_invariants_hold_through_random_play() {
        let mut state = GameState::new(Difficulty::Pro, 2024);
        for _ in 0..200 {
            if let Some((a, b)) = state.available_matches().first().copied() {
                state.click_tile(a);
                state.click_tile(b);
            } else if state.can_shuffle() {
                state.shuffle();
            } else {
                break;
            }

            assert!(state.tiles().iter().all(|t| !(t.is_matched && t.is_blocked)));
            assert_eq!(state.is_complete(), state.remaining_tiles() == 0);
            if !state.is_complete() {
                assert_eq!(state.is_game_over(), state.available_matches().is_empty());
            }
            if state.is_complete() {
                break;
            }
        }
    }
}
