//! Scoring module - running and completion scores
//!
//! While the board is open every match is worth a flat `MATCH_POINTS`. The move that
//! clears the board replaces that running total with the completion score:
//!
//! `max(0, 1000 + max(0, 600 - seconds) - 2 * moves - 10 * hints)`

use crate::types::{HINT_PENALTY, MATCH_POINTS, MOVE_PENALTY, SCORE_BASE, TIME_BONUS_WINDOW_SECS};

/// Terms of the completion score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub base: u32,
    /// One point per second under the bonus window
    pub time_bonus: u32,
    pub move_penalty: u32,
    pub hint_penalty: u32,
    /// Never below zero
    pub total: u32,
}

/// Running score after one more match
pub fn add_match_points(score: u32) -> u32 {
    score.saturating_add(MATCH_POINTS)
}

/// Completion score with each term spelled out
pub fn score_breakdown(moves: u32, time_elapsed_secs: u32, hints_used: u32) -> ScoreBreakdown {
    let time_bonus = TIME_BONUS_WINDOW_SECS.saturating_sub(time_elapsed_secs);
    let move_penalty = moves.saturating_mul(MOVE_PENALTY);
    let hint_penalty = hints_used.saturating_mul(HINT_PENALTY);
    let total = SCORE_BASE
        .saturating_add(time_bonus)
        .saturating_sub(move_penalty)
        .saturating_sub(hint_penalty);

    ScoreBreakdown {
        base: SCORE_BASE,
        time_bonus,
        move_penalty,
        hint_penalty,
        total,
    }
}

/// Completion score
pub fn final_score(moves: u32, time_elapsed_secs: u32, hints_used: u32) -> u32 {
    score_breakdown(moves, time_elapsed_secs, hints_used).total
}
