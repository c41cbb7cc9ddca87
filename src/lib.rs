//! Mahjong Solitaire (workspace facade crate).
//!
//! Re-exports `mahjong_solitaire::{core,adapter,types}` so hosts depend on one package
//! while the implementation lives in dedicated crates under `crates/`.

pub use mahjong_solitaire_adapter as adapter;
pub use mahjong_solitaire_core as core;
pub use mahjong_solitaire_types as types;
