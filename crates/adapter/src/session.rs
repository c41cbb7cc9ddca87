//! Session runtime: one game driven by protocol lines

use tracing::{debug, warn};

use crate::core::{GameSnapshot, GameState};
use crate::protocol::*;
use crate::types::{Difficulty, GameAction, TileId};

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub difficulty: Difficulty,
    pub seed: u32,
    /// Send an observation after every command
    pub stream_observations: bool,
    /// Host advances the clock once per second
    pub auto_tick: bool,
    pub log_level: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Rookie,
            seed: 1,
            stream_observations: true,
            auto_tick: true,
            log_level: "info".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let difficulty = env::var("MAHJONG_DIFFICULTY")
            .ok()
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or_default();

        let seed = env::var("MAHJONG_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let stream_observations = env::var("MAHJONG_OBSERVE")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let auto_tick = env::var("MAHJONG_AUTO_TICK")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let log_level = env::var("MAHJONG_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        Self {
            difficulty,
            seed,
            stream_observations,
            auto_tick,
            log_level,
        }
    }
}

fn parse_flag(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("on")
}

fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    (nanos ^ (nanos >> 32)) as u32
}

/// Outbound message to the client
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl OutboundMessage {
    /// Serialize as one protocol line (no trailing newline)
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        match self {
            OutboundMessage::Ack(m) => serde_json::to_string(m),
            OutboundMessage::Error(m) => serde_json::to_string(m),
            OutboundMessage::Observation(m) => serde_json::to_string(m),
        }
    }
}

/// A command after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionCommand {
    Action(GameAction),
    Observe,
}

/// One game plus its outbound sequence counter
pub struct Session {
    config: AdapterConfig,
    game: GameState,
    seq: u64,
    snap: GameSnapshot,
}

impl Session {
    pub fn new(config: AdapterConfig) -> Self {
        let game = GameState::new(config.difficulty, config.seed);
        Self {
            config,
            game,
            seq: 0,
            snap: GameSnapshot::default(),
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Advance the clock by one second (host timer)
    pub fn tick(&mut self) -> bool {
        self.game.tick()
    }

    /// Current observation
    pub fn observation(&mut self) -> ObservationMessage {
        self.game.snapshot_into(&mut self.snap);
        let seq = self.next_seq();
        create_observation(seq, &self.snap)
    }

    /// Error reply for a line that could not be decoded as text
    pub fn unreadable_line(&mut self, reason: &str) -> OutboundMessage {
        let seq = self.next_seq();
        OutboundMessage::Error(create_error(seq, None, ErrorCode::InvalidJson, reason))
    }

    /// Handle one inbound line; blank lines produce no output
    pub fn handle_line(&mut self, line: &str) -> Vec<OutboundMessage> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        let msg = match parse_message(line) {
            Ok(ParsedMessage::Command(msg)) => msg,
            Ok(ParsedMessage::Unknown(u)) => {
                let seq = self.next_seq();
                return vec![OutboundMessage::Error(create_error(
                    seq,
                    Some(u.seq),
                    ErrorCode::InvalidCommand,
                    "unknown message type",
                ))];
            }
            Err(e) => {
                warn!(error = %e, "rejected inbound line");
                let seq = self.next_seq();
                let code = if serde_json::from_str::<serde_json::Value>(line).is_ok() {
                    ErrorCode::InvalidCommand
                } else {
                    ErrorCode::InvalidJson
                };
                return vec![OutboundMessage::Error(create_error(
                    seq,
                    extract_seq_best_effort(line),
                    code,
                    &e.to_string(),
                ))];
            }
        };

        let command = match self.validate(&msg) {
            Ok(command) => command,
            Err((code, message)) => {
                let seq = self.next_seq();
                return vec![OutboundMessage::Error(create_error(
                    seq,
                    Some(msg.seq),
                    code,
                    message,
                ))];
            }
        };

        let (changed, hint) = match command {
            SessionCommand::Action(GameAction::Hint) => match self.game.show_hint() {
                Some((a, b)) => (true, Some([a.0, b.0])),
                None => (false, None),
            },
            SessionCommand::Action(action) => (self.game.apply_action(action), None),
            SessionCommand::Observe => (false, None),
        };
        let action = match command {
            SessionCommand::Action(action) => action.as_str(),
            SessionCommand::Observe => "observe",
        };
        debug!(command_seq = msg.seq, action, changed, "command applied");

        let seq = self.next_seq();
        let mut out = vec![OutboundMessage::Ack(create_ack(seq, msg.seq, changed, hint))];
        if self.config.stream_observations || command == SessionCommand::Observe {
            out.push(OutboundMessage::Observation(self.observation()));
        }
        out
    }

    fn validate(&self, msg: &CommandMessage) -> Result<SessionCommand, (ErrorCode, &'static str)> {
        let action = match msg.action {
            ActionName::Click => {
                let id = msg
                    .tile
                    .ok_or((ErrorCode::MissingTile, "click needs a tile id"))?;
                GameAction::Click(TileId(id))
            }
            ActionName::Hint => GameAction::Hint,
            ActionName::Shuffle => GameAction::Shuffle,
            ActionName::Tick => GameAction::Tick,
            ActionName::NewGame => {
                let difficulty = match msg.difficulty.as_deref() {
                    None => self.game.difficulty(),
                    Some(s) => Difficulty::from_str(s)
                        .ok_or((ErrorCode::UnknownDifficulty, "unknown difficulty"))?,
                };
                GameAction::NewGame(difficulty)
            }
            ActionName::Observe => return Ok(SessionCommand::Observe),
        };
        Ok(SessionCommand::Action(action))
    }
}
