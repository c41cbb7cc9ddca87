//! Adapter module - external control via line-delimited JSON
//!
//! This crate lets a host process (a GUI, a script, an automated player) drive a Mahjong
//! Solitaire session over any byte stream. The binary wires it to stdin/stdout.
//!
//! # Protocol Overview
//!
//! 1. **Commands**: the client sends one `command` object per line
//! 2. **Acks**: every valid command is answered with an `ack`
//! 3. **Observations**: a full board snapshot follows each ack when streaming is on,
//!    or on request with the `observe` action
//! 4. **Errors**: bad lines get an `error` with a machine-readable code
//!
//! # Message Types
//!
//! ## Client → Engine
//!
//! - **command**: `action` is one of `click` (with `tile`), `hint`, `shuffle`,
//!   `newGame` (optional `difficulty`), `tick`, `observe`
//!
//! ## Engine → Client
//!
//! - **ack**: `command_seq`, `changed`, and the `hint` pair for hint commands
//! - **observation**: difficulty, counters, terminal flags and every tile
//! - **error**: `invalid_json`, `invalid_command`, `unknown_difficulty`, `missing_tile`
//!
//! # Environment Variables
//!
//! - `MAHJONG_DIFFICULTY`: `rookie`, `pro` or `master` (default: rookie)
//! - `MAHJONG_SEED`: deal seed (default: derived from the clock)
//! - `MAHJONG_OBSERVE`: stream observations after each command (default: on)
//! - `MAHJONG_AUTO_TICK`: advance the clock once per second (default: on)
//! - `MAHJONG_LOG`: log level for stderr output (default: info)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Engine: {"type":"command","seq":1,"action":"hint"}
//! Engine -> Client: {"type":"ack","seq":1,"ts":1234567890,"command_seq":1,"status":"ok","changed":true,"hint":[3,17]}
//! Engine -> Client: {"type":"observation","seq":2,"ts":1234567890,"game_id":0,"difficulty":"rookie",...}
//! Client -> Engine: {"type":"command","seq":2,"action":"click","tile":3}
//! Engine -> Client: {"type":"ack","seq":3,"ts":1234567891,"command_seq":2,"status":"ok","changed":true}
//! ```

pub mod host;
pub mod protocol;
pub mod session;

pub use mahjong_solitaire_core as core;
pub use mahjong_solitaire_types as types;

// Re-export protocol types for convenience
pub use host::{run_host, TICK_INTERVAL};
pub use protocol::*;
pub use session::{AdapterConfig, OutboundMessage, Session};
