//! Tile set module - the multiset of faces dealt onto a layout
//!
//! The standard pool is 136 tiles: four copies of every suited rank, wind and dragon.
//! The classic pool adds one of each flower and season (144 tiles).
//!
//! Boards are dealt pair-wise (see [`tile_set_for_slots`]) so every face occurs an even
//! number of times no matter how many slots the layout has.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::types::{Dragon, Flower, Season, Suit, TileFace, Wind, COPIES_PER_FACE};

/// Size of the standard pool
pub const STANDARD_SET_SIZE: usize = 136;

/// Size of the classic pool (standard plus flowers and seasons)
pub const CLASSIC_SET_SIZE: usize = 144;

/// Every regular face once, in a fixed order
fn regular_faces() -> impl Iterator<Item = TileFace> {
    let suited = Suit::ALL
        .into_iter()
        .flat_map(|suit| (1..=9u8).map(move |rank| TileFace::Suited(suit, rank)));
    let winds = Wind::ALL.into_iter().map(TileFace::Wind);
    let dragons = Dragon::ALL.into_iter().map(TileFace::Dragon);
    suited.chain(winds).chain(dragons)
}

/// The 136-tile standard pool
pub fn generate_tile_set() -> Vec<TileFace> {
    let mut set = Vec::with_capacity(STANDARD_SET_SIZE);
    for face in regular_faces() {
        set.extend(std::iter::repeat(face).take(COPIES_PER_FACE));
    }
    set
}

/// The 144-tile classic pool
pub fn generate_classic_tile_set() -> Vec<TileFace> {
    let mut set = generate_tile_set();
    set.extend(Flower::ALL.into_iter().map(TileFace::Flower));
    set.extend(Season::ALL.into_iter().map(TileFace::Season));
    set
}

/// Group a pool into matchable pairs
///
/// Regular faces pair with a copy of themselves. Wildcard faces pair with any other face
/// of the same category, so the four flowers form two pairs.
fn pair_up(pool: &[TileFace]) -> Vec<(TileFace, TileFace)> {
    let mut sorted = pool.to_vec();
    sorted.sort_unstable_by_key(|f| (f.category(), *f));

    let mut pairs = Vec::with_capacity(sorted.len() / 2);
    let mut iter = sorted.into_iter();
    while let (Some(a), Some(b)) = (iter.next(), iter.next()) {
        pairs.push((a, b));
    }
    pairs
}

/// Deal exactly `slots` faces in matchable pairs
///
/// Pairs are drawn from the classic pool when the layout is large enough to hold it,
/// otherwise from the standard pool. When the layout needs more pairs than the pool
/// holds, the shuffled pair list is reused from the start. The result is ordered pair by
/// pair; callers shuffle before dealing.
pub fn tile_set_for_slots<R: Rng + ?Sized>(slots: usize, rng: &mut R) -> Vec<TileFace> {
    let pool = if slots >= CLASSIC_SET_SIZE {
        generate_classic_tile_set()
    } else {
        generate_tile_set()
    };

    let mut pairs = pair_up(&pool);
    pairs.shuffle(rng);

    let mut faces = Vec::with_capacity(slots);
    for &(a, b) in pairs.iter().cycle().take(slots / 2) {
        faces.push(a);
        faces.push(b);
    }

    if slots % 2 == 1 {
        warn!(slots, "odd slot count, board cannot be cleared");
        if let Some(&(extra, _)) = pairs.get((slots / 2) % pairs.len()) {
            faces.push(extra);
        }
    }

    faces
}
