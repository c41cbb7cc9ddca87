//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Mahjong Solitaire board engine: board generation, blocking
//! rules, matching, hints, reshuffles, the selection state machine and scoring.
//! It has **no dependencies** on rendering, networking, timers or storage, making it:
//!
//! - **Deterministic**: Same seed produces identical deals and hints
//! - **Testable**: Every rule has unit tests beside it
//! - **Portable**: Any host (terminal, GUI, headless adapter) drives it through plain calls
//!
//! # Module Structure
//!
//! - [`layout`]: Static slot templates per difficulty
//! - [`tileset`]: Tile face pools and pair-wise dealing
//! - [`board`]: The `Tile` record and the board builder
//! - [`occlusion`]: Covered / flanked blocking rules
//! - [`matching`]: Pair validity and available-move search
//! - [`game_state`]: Selection state machine, hints, shuffle, timing, scoring hooks
//! - [`scoring`]: Running and completion scores
//! - [`rng`]: Seeded default random source
//! - [`snapshot`]: Read-only copies for hosts
//!
//! # Game Rules
//!
//! - **Blocking**: a tile is blocked when a higher tile overlaps its 3x3 neighbourhood,
//!   or when tiles sit directly left and right of it on its layer
//! - **Matching**: two free tiles with the same face; any two flowers or any two seasons
//! - **Scoring**: +10 per match while playing; clearing the board replaces that with
//!   `1000 + time bonus - 2 * moves - 10 * hints`
//! - **Shuffle**: only offered when no pair is available
//!
//! # Example
//!
//! ```
//! use mahjong_solitaire_core::GameState;
//! use mahjong_solitaire_types::{Difficulty, GameAction};
//!
//! let mut game = GameState::new(Difficulty::Rookie, 12345);
//!
//! if let Some((a, b)) = game.available_matches().first().copied() {
//!     game.apply_action(GameAction::Click(a));
//!     game.apply_action(GameAction::Click(b));
//!     assert_eq!(game.moves(), 1);
//!     assert_eq!(game.score(), 10);
//! }
//!
//! game.apply_action(GameAction::Tick);
//! assert!(game.time_elapsed_seconds() <= 1);
//! ```
//!
//! # Timing
//!
//! The engine keeps no clock. The host calls [`GameState::tick`](game_state::GameState::tick)
//! once per second; ticks stop counting once the board is cleared or stuck.

pub mod board;
pub mod game_state;
pub mod layout;
pub mod matching;
pub mod occlusion;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tileset;

pub use mahjong_solitaire_types as types;

// Re-export commonly used types for convenience
pub use board::{bind_faces, build_board, Tile};
pub use game_state::GameState;
pub use layout::{layout_for, LayoutTemplate};
pub use matching::{can_match, find_available_matches, has_available_match};
pub use occlusion::{is_blocked, recompute_blocked};
pub use rng::SimpleRng;
pub use scoring::{final_score, score_breakdown, ScoreBreakdown};
pub use snapshot::GameSnapshot;
pub use tileset::{generate_classic_tile_set, generate_tile_set, tile_set_for_slots};
