//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, host adapters, benches).
//!
//! # Tile Faces
//!
//! A tile face is the identity printed on a tile (category plus value):
//!
//! | Category | Values | Copies in a set |
//! |----------|--------|-----------------|
//! | Characters, Circles, Bamboo | 1-9 | 4 each |
//! | Wind | East, South, West, North | 4 each |
//! | Dragon | Red, Green, White | 4 each |
//! | Flower | Plum, Orchid, Chrysanthemum, Bamboo | 1 each |
//! | Season | Spring, Summer, Autumn, Winter | 1 each |
//!
//! Flowers and seasons are wildcard categories: any flower matches any other flower.
//!
//! # Geometry
//!
//! Positions are `(row, column, layer)` with layer 0 on the table. Pixel coordinates
//! are derived for hosts only:
//!
//! - `x = column * TILE_WIDTH_PX + layer * LAYER_OFFSET_PX`
//! - `y = row * TILE_HEIGHT_PX + layer * LAYER_OFFSET_PX`
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATCH_POINTS` | 10 | Running score per match while the board is open |
//! | `SCORE_BASE` | 1000 | Base of the completion score |
//! | `TIME_BONUS_WINDOW_SECS` | 600 | Seconds of time bonus, one point per second left |
//! | `MOVE_PENALTY` | 2 | Points lost per move at completion |
//! | `HINT_PENALTY` | 10 | Points lost per hint at completion |
//!
//! # Examples
//!
//! ```
//! use mahjong_solitaire_types::{Difficulty, Suit, TileCategory, TileFace, Wind};
//!
//! let face = TileFace::Suited(Suit::Circles, 5);
//! assert_eq!(face.category(), TileCategory::Circles);
//! assert_eq!(face.value_label(), "5");
//!
//! assert_eq!(TileFace::Wind(Wind::East).category(), TileCategory::Wind);
//!
//! // Parse difficulty (case-insensitive)
//! assert_eq!(Difficulty::from_str("Master"), Some(Difficulty::Master));
//! assert_eq!(Difficulty::from_str("expert"), None);
//! ```

use std::fmt;

/// Horizontal pixel pitch of one column
pub const TILE_WIDTH_PX: i32 = 30;

/// Vertical pixel pitch of one row
pub const TILE_HEIGHT_PX: i32 = 40;

/// Pixel offset applied per layer so stacked tiles look raised
pub const LAYER_OFFSET_PX: i32 = 2;

/// Copies of each regular face in a tile set
pub const COPIES_PER_FACE: usize = 4;

/// Running score awarded per match before completion
pub const MATCH_POINTS: u32 = 10;

/// Base of the completion score
pub const SCORE_BASE: u32 = 1000;

/// Time bonus window in seconds (one point per second under the window)
pub const TIME_BONUS_WINDOW_SECS: u32 = 600;

/// Completion penalty per move
pub const MOVE_PENALTY: u32 = 2;

/// Completion penalty per hint
pub const HINT_PENALTY: u32 = 10;

/// Maximum arrangements drawn by one shuffle while looking for an open pair
pub const SHUFFLE_ATTEMPTS: usize = 32;

/// The three numbered suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Characters,
    Circles,
    Bamboo,
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Characters, Suit::Circles, Suit::Bamboo];
}

/// The four winds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];

    pub fn as_str(&self) -> &'static str {
        match self {
            Wind::East => "east",
            Wind::South => "south",
            Wind::West => "west",
            Wind::North => "north",
        }
    }
}

/// The three dragons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dragon {
    Red,
    Green,
    White,
}

impl Dragon {
    pub const ALL: [Dragon; 3] = [Dragon::Red, Dragon::Green, Dragon::White];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dragon::Red => "red",
            Dragon::Green => "green",
            Dragon::White => "white",
        }
    }
}

/// The four flower tiles (wildcard category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flower {
    Plum,
    Orchid,
    Chrysanthemum,
    Bamboo,
}

impl Flower {
    pub const ALL: [Flower; 4] = [
        Flower::Plum,
        Flower::Orchid,
        Flower::Chrysanthemum,
        Flower::Bamboo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flower::Plum => "plum",
            Flower::Orchid => "orchid",
            Flower::Chrysanthemum => "chrysanthemum",
            Flower::Bamboo => "bamboo",
        }
    }
}

/// The four season tiles (wildcard category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

/// Tile category, the first half of a tile identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileCategory {
    Characters,
    Circles,
    Bamboo,
    Wind,
    Dragon,
    Flower,
    Season,
}

impl TileCategory {
    /// Whether any two tiles of this category match regardless of value
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TileCategory::Flower | TileCategory::Season)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileCategory::Characters => "characters",
            TileCategory::Circles => "circles",
            TileCategory::Bamboo => "bamboo",
            TileCategory::Wind => "wind",
            TileCategory::Dragon => "dragon",
            TileCategory::Flower => "flower",
            TileCategory::Season => "season",
        }
    }
}

/// Identity of a tile: category plus value
///
/// Suited ranks are 1-9. Faces are never mutated once dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileFace {
    Suited(Suit, u8),
    Wind(Wind),
    Dragon(Dragon),
    Flower(Flower),
    Season(Season),
}

const RANK_LABELS: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl TileFace {
    pub fn category(&self) -> TileCategory {
        match self {
            TileFace::Suited(Suit::Characters, _) => TileCategory::Characters,
            TileFace::Suited(Suit::Circles, _) => TileCategory::Circles,
            TileFace::Suited(Suit::Bamboo, _) => TileCategory::Bamboo,
            TileFace::Wind(_) => TileCategory::Wind,
            TileFace::Dragon(_) => TileCategory::Dragon,
            TileFace::Flower(_) => TileCategory::Flower,
            TileFace::Season(_) => TileCategory::Season,
        }
    }

    /// Value printed on the tile ("1".."9" or a lowercase label)
    pub fn value_label(&self) -> &'static str {
        match self {
            TileFace::Suited(_, rank) => {
                let idx = (*rank as usize).clamp(1, 9) - 1;
                RANK_LABELS[idx]
            }
            TileFace::Wind(w) => w.as_str(),
            TileFace::Dragon(d) => d.as_str(),
            TileFace::Flower(f) => f.as_str(),
            TileFace::Season(s) => s.as_str(),
        }
    }
}

impl fmt::Display for TileFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category().as_str(), self.value_label())
    }
}

/// Stable tile identifier, assigned once at board build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A slot on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub column: i8,
    pub layer: u8,
}

impl Position {
    pub const fn new(row: i8, column: i8, layer: u8) -> Self {
        Self { row, column, layer }
    }

    /// Pixel coordinates for rendering `(x, y)`
    pub fn pixel(&self) -> (i32, i32) {
        let offset = self.layer as i32 * LAYER_OFFSET_PX;
        (
            self.column as i32 * TILE_WIDTH_PX + offset,
            self.row as i32 * TILE_HEIGHT_PX + offset,
        )
    }
}

/// Difficulty tier, keys the layout catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Rookie,
    Pro,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Rookie, Difficulty::Pro, Difficulty::Master];

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_solitaire_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("rookie"), Some(Difficulty::Rookie));
    /// assert_eq!(Difficulty::from_str("PRO"), Some(Difficulty::Pro));
    /// assert_eq!(Difficulty::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rookie" => Some(Difficulty::Rookie),
            "pro" => Some(Difficulty::Pro),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Rookie => "rookie",
            Difficulty::Pro => "pro",
            Difficulty::Master => "master",
        }
    }
}

/// Host operations that mutate a game session
///
/// Used by the adapter protocol and by any host loop that prefers a single
/// dispatch point over calling the engine methods directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Click (select, deselect or match) a tile
    Click(TileId),
    /// Highlight one available pair
    Hint,
    /// Rearrange the remaining tiles when no move is left
    Shuffle,
    /// Deal a fresh board at the given difficulty
    NewGame(Difficulty),
    /// One second of wall-clock time passed
    Tick,
}

impl GameAction {
    /// camelCase name used by the adapter protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Click(_) => "click",
            GameAction::Hint => "hint",
            GameAction::Shuffle => "shuffle",
            GameAction::NewGame(_) => "newGame",
            GameAction::Tick => "tick",
        }
    }
}
