//! Layout module - the static catalog of board shapes
//!
//! Each difficulty maps to one template: an ordered list of `(row, column, layer)`
//! slots. Templates are written as row spans and expanded once into a process-wide
//! read-only catalog.
//!
//! Slot counts must be even for a board to be clearable; the engine does not check this
//! (the tests below do).

use std::sync::OnceLock;

use crate::types::{Difficulty, Position};

/// One horizontal run of slots: (layer, row, first column, last column), inclusive
type Span = (u8, i8, i8, i8);

/// Flat 4x6 grid
const ROOKIE_SPANS: &[Span] = &[(0, 0, 0, 5), (0, 1, 0, 5), (0, 2, 0, 5), (0, 3, 0, 5)];

/// Two layers, loosely shaped like the classical turtle
const PRO_SPANS: &[Span] = &[
    (0, 0, 1, 10),
    (0, 1, 2, 9),
    (0, 2, 0, 11),
    (0, 3, 0, 11),
    (0, 4, 2, 9),
    (0, 5, 1, 10),
    (1, 1, 4, 7),
    (1, 2, 4, 7),
    (1, 3, 4, 7),
    (1, 4, 4, 7),
];

/// Three stacked grids: 8x12, 6x6, 3x4
const MASTER_SPANS: &[Span] = &[
    (0, 0, 0, 11),
    (0, 1, 0, 11),
    (0, 2, 0, 11),
    (0, 3, 0, 11),
    (0, 4, 0, 11),
    (0, 5, 0, 11),
    (0, 6, 0, 11),
    (0, 7, 0, 11),
    (1, 1, 3, 8),
    (1, 2, 3, 8),
    (1, 3, 3, 8),
    (1, 4, 3, 8),
    (1, 5, 3, 8),
    (1, 6, 3, 8),
    (2, 2, 4, 7),
    (2, 3, 4, 7),
    (2, 4, 4, 7),
];

/// Named, immutable list of board slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTemplate {
    name: &'static str,
    positions: Vec<Position>,
}

impl LayoutTemplate {
    /// Build a template from explicit slots (custom boards, tests)
    pub fn from_positions(name: &'static str, positions: Vec<Position>) -> Self {
        Self { name, positions }
    }

    fn from_spans(name: &'static str, spans: &[Span]) -> Self {
        let positions = spans
            .iter()
            .flat_map(|&(layer, row, first, last)| {
                (first..=last).map(move |column| Position::new(row, column, layer))
            })
            .collect();
        Self::from_positions(name, positions)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of tile slots
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Highest layer used by the template
    pub fn max_layer(&self) -> u8 {
        self.positions.iter().map(|p| p.layer).max().unwrap_or(0)
    }
}

static CATALOG: OnceLock<[LayoutTemplate; 3]> = OnceLock::new();

fn catalog() -> &'static [LayoutTemplate; 3] {
    CATALOG.get_or_init(|| {
        [
            LayoutTemplate::from_spans("rookie", ROOKIE_SPANS),
            LayoutTemplate::from_spans("pro", PRO_SPANS),
            LayoutTemplate::from_spans("master", MASTER_SPANS),
        ]
    })
}

/// Look up the template for a difficulty
pub fn layout_for(difficulty: Difficulty) -> &'static LayoutTemplate {
    let catalog = catalog();
    match difficulty {
        Difficulty::Rookie => &catalog[0],
        Difficulty::Pro => &catalog[1],
        Difficulty::Master => &catalog[2],
    }
}
