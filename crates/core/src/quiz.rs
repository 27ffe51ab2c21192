//! Quiz stage/level gating and reward amounts.
//!
//! A level is a 1-ordered sequence of stages; each stage is a group of
//! questions. The unlock chain is strictly linear: the first stage of a
//! level is always unlocked, every later stage requires the previous stage
//! to be fully completed, and a level requires the previous level to be
//! fully completed.

use serde::Serialize;

/// Per-stage completion counts for one user, as loaded from the store.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageCounts {
    pub stage: i32,
    pub total: i64,
    pub completed: i64,
}

/// Flat reward for clearing a stage.
pub const STAGE_CLEAR_COINS: i32 = 10;
pub const STAGE_CLEAR_XP: i32 = 20;

/// Reward for clearing a whole level, scaled by the level's order.
pub fn level_clear_reward(level_order: i32) -> (i32, i32) {
    (50 * level_order, 100 * level_order)
}

/// Completion percentage, rounded to the nearest integer. Empty stages
/// count as complete (there is nothing left to answer).
pub fn completion_percent(completed: i64, total: i64) -> i32 {
    if total == 0 {
        return 100;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Whether every question of the stage is completed.
pub fn stage_complete(counts: &StageCounts) -> bool {
    counts.completed >= counts.total
}

/// Whether the stage at `index` is unlocked: the first stage always is,
/// every later stage requires the previous one to be complete.
pub fn stage_unlocked(stages: &[StageCounts], index: usize) -> bool {
    if index == 0 {
        return true;
    }
    match stages.get(index - 1) {
        Some(prev) => stage_complete(prev),
        None => false,
    }
}

/// Whether a level is unlocked given the previous level's counts.
///
/// The first level (no predecessor) is always unlocked; any other level
/// requires all questions of the previous level to be completed.
pub fn level_unlocked(previous: Option<(i64, i64)>) -> bool {
    match previous {
        None => true,
        Some((total, completed)) => total > 0 && completed >= total,
    }
}
