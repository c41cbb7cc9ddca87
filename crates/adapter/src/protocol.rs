//! Protocol module - JSON message types for the host adapter
//!
//! Line-delimited JSON. Every message has: type, seq (sequence number), ts (timestamp
//! in ms).

use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, Tile};
use crate::types::{Difficulty, TileCategory};

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    #[serde(rename = "command")]
    Command,
}

impl Default for CommandType {
    fn default() -> Self {
        Self::Command
    }
}

/// Command message
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub action: ActionName,
    /// Target of `click`
    #[serde(default)]
    pub tile: Option<u32>,
    /// Optional difficulty for `newGame` (defaults to the current one)
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    Click,
    Hint,
    Shuffle,
    NewGame,
    Tick,
    /// Request an observation without changing anything
    Observe,
}

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("click") {
            Ok(Self::Click)
        } else if s.eq_ignore_ascii_case("hint") {
            Ok(Self::Hint)
        } else if s.eq_ignore_ascii_case("shuffle") {
            Ok(Self::Shuffle)
        } else if s.eq_ignore_ascii_case("newGame") {
            Ok(Self::NewGame)
        } else if s.eq_ignore_ascii_case("tick") {
            Ok(Self::Tick)
        } else if s.eq_ignore_ascii_case("observe") {
            Ok(Self::Observe)
        } else {
            Err(serde::de::Error::custom("unknown action"))
        }
    }
}

impl Serialize for ActionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match self {
            ActionName::Click => "click",
            ActionName::Hint => "hint",
            ActionName::Shuffle => "shuffle",
            ActionName::NewGame => "newGame",
            ActionName::Tick => "tick",
            ActionName::Observe => "observe",
        })
    }
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_json")]
    InvalidJson,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "unknown_difficulty")]
    UnknownDifficulty,
    #[serde(rename = "missing_tile")]
    MissingTile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Acknowledgment for a command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    /// Seq of the command being acknowledged
    pub command_seq: u64,
    pub status: AckStatus,
    /// Whether the command changed the session
    pub changed: bool,
    /// Pair to highlight, for `hint`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<[u32; 2]>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    /// Seq of the offending command, when it could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_seq: Option<u64>,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLower {
    Rookie,
    Pro,
    Master,
}

impl From<Difficulty> for DifficultyLower {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Rookie => Self::Rookie,
            Difficulty::Pro => Self::Pro,
            Difficulty::Master => Self::Master,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLower {
    Characters,
    Circles,
    Bamboo,
    Wind,
    Dragon,
    Flower,
    Season,
}

impl From<TileCategory> for CategoryLower {
    fn from(value: TileCategory) -> Self {
        match value {
            TileCategory::Characters => Self::Characters,
            TileCategory::Circles => Self::Circles,
            TileCategory::Bamboo => Self::Bamboo,
            TileCategory::Wind => Self::Wind,
            TileCategory::Dragon => Self::Dragon,
            TileCategory::Flower => Self::Flower,
            TileCategory::Season => Self::Season,
        }
    }
}

/// One tile as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileObservation {
    pub id: u32,
    pub category: CategoryLower,
    pub value: String,
    pub row: i8,
    pub column: i8,
    pub layer: u8,
    pub x: i32,
    pub y: i32,
    pub selected: bool,
    pub matched: bool,
    pub blocked: bool,
}

impl From<&Tile> for TileObservation {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id.0,
            category: tile.category().into(),
            value: tile.face.value_label().to_string(),
            row: tile.row(),
            column: tile.column(),
            layer: tile.layer(),
            x: tile.x,
            y: tile.y,
            selected: tile.is_selected,
            matched: tile.is_matched,
            blocked: tile.is_blocked,
        }
    }
}

/// Full session observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub game_id: u32,
    pub difficulty: DifficultyLower,
    pub playable: bool,
    pub complete: bool,
    pub game_over: bool,
    pub can_shuffle: bool,
    pub moves: u32,
    pub score: u32,
    pub hints_used: u32,
    pub time_elapsed_seconds: u32,
    pub remaining: usize,
    pub available_matches: usize,
    #[serde(default)]
    pub selected: Option<u32>,
    pub tiles: Vec<TileObservation>,
}

// ============== Message Parsing ==============

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "command")]
        Command(CommandMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let probe = serde_json::from_str::<TypeOnly>(json)?;
            if probe.msg_type.as_deref() != Some("command") {
                return Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: probe.seq.unwrap_or(0),
                }));
            }
            Err(e)
        }
    }
}

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Command(CommandMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Pull `seq` out of a line that failed to parse, if it is readable at all
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Utility Functions ==============

/// Create an acknowledgment
pub fn create_ack(seq: u64, command_seq: u64, changed: bool, hint: Option<[u32; 2]>) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        command_seq,
        status: AckStatus::Ok,
        changed,
        hint,
    }
}

/// Create an error message
pub fn create_error(
    seq: u64,
    command_seq: Option<u64>,
    code: ErrorCode,
    message: &str,
) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        command_seq,
        code,
        message: message.to_string(),
    }
}

/// Create an observation from a snapshot
pub fn create_observation(seq: u64, snap: &GameSnapshot) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        game_id: snap.game_id,
        difficulty: snap.difficulty.into(),
        playable: snap.playable(),
        complete: snap.is_complete,
        game_over: snap.is_game_over,
        can_shuffle: snap.can_shuffle,
        moves: snap.moves,
        score: snap.score,
        hints_used: snap.hints_used,
        time_elapsed_seconds: snap.time_elapsed_seconds,
        remaining: snap.remaining,
        available_matches: snap.available_matches,
        selected: snap.selected.map(|id| id.0),
        tiles: snap.tiles.iter().map(TileObservation::from).collect(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
