//! Mission descriptors, reward scaling, and level-up evaluation.
//!
//! Every mission in the catalog maps to one [`MissionDescriptor`] and all of
//! them are driven through the same evaluation routine, so the lifecycle
//! differences between missions (daily counter vs. long-running, derived
//! progress vs. touch-incremented, fixed tier table vs. multiplier chain,
//! cooldown or not) live in data rather than in per-mission branching.
//!
//! This module contains no I/O. The caller loads the mission row and the
//! user's progress row, asks [`evaluate_level_up`] what should happen, and
//! performs the resulting write as a single conditional statement.

use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Catalog keys
// ---------------------------------------------------------------------------

/// Long-running missions, keyed by `mission.name`.
pub const MISSION_LOGIN_STREAK: &str = "Login Streak!";
pub const MISSION_WORD_WARRIOR: &str = "Word Warrior";
pub const MISSION_SIGN_MASTER: &str = "Sign Master";
pub const MISSION_LEVEL_UP: &str = "Level Up!";

/// Daily missions, keyed by `daily_mission.name`.
pub const DAILY_LOGIN: &str = "Daily Login";
pub const DAILY_QUIZ: &str = "Quiz Whiz";
pub const DAILY_DICTIONARY: &str = "Dictionary Explorer";

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A dictionary entry counts as mastered at this many practice repetitions.
pub const MASTERY_THRESHOLD: i32 = 5;

/// XP per user level; "Level Up!" derives its progress from `xp / 1000`.
pub const XP_PER_LEVEL: i32 = 1000;

/// Cooldown between two level-ups of a cooldown-gated mission.
pub const LEVEL_UP_COOLDOWN_HOURS: i64 = 24;

/// Per-level step of the requirement/reward multiplier chain.
const MULTIPLIER_STEP: f64 = 1.5;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One tier of a fixed-table mission: the requirement to finish this tier
/// and the rewards granted when it is finished.
#[derive(Debug, Clone, Copy)]
pub struct LevelTier {
    pub level: i32,
    pub requirement: i32,
    pub xp_reward: i32,
    pub points_reward: i32,
}

/// Fixed tier table for "Level Up!".
pub const LEVEL_UP_TIERS: &[LevelTier] = &[
    LevelTier { level: 1, requirement: 5, xp_reward: 100, points_reward: 50 },
    LevelTier { level: 2, requirement: 8, xp_reward: 200, points_reward: 100 },
    LevelTier { level: 3, requirement: 12, xp_reward: 300, points_reward: 150 },
    LevelTier { level: 4, requirement: 15, xp_reward: 400, points_reward: 200 },
];

/// Where a long-running mission's authoritative progress value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    /// Incremented by the login event; not derived from another counter.
    LoginEvents,
    /// Count of dictionary entries with `progress_point >= MASTERY_THRESHOLD`.
    MasteredWords,
    /// Count of `badge1..badge4` flags set on the user row.
    Badges,
    /// `floor(xp / XP_PER_LEVEL)`.
    UserLevel,
}

/// How requirements and rewards change when the mission levels up.
#[derive(Debug, Clone, Copy)]
pub enum Scaling {
    /// `round(base * (1 + (level-1) * 1.5))` for the requirement and the
    /// analogous `floor` formulas for both rewards.
    Multiplier,
    /// Values come from a fixed tier table; the mission ends after the
    /// final tier.
    Table(&'static [LevelTier]),
}

/// Static configuration of a long-running mission.
#[derive(Debug, Clone, Copy)]
pub struct MissionDescriptor {
    pub name: &'static str,
    pub source: ProgressSource,
    pub scaling: Scaling,
    /// At most one level-up per 24 hours when set.
    pub cooldown: bool,
    /// Level-up subtracts the just-met requirement from `progress_point`.
    pub consumes_progress: bool,
}

/// Static configuration of a daily mission.
#[derive(Debug, Clone, Copy)]
pub struct DailyDescriptor {
    pub name: &'static str,
    /// Whether reaching the requirement marks `completed_at` immediately,
    /// or the claim action performs that transition.
    pub auto_complete: bool,
}

const MISSIONS: &[MissionDescriptor] = &[
    MissionDescriptor {
        name: MISSION_LOGIN_STREAK,
        source: ProgressSource::LoginEvents,
        scaling: Scaling::Multiplier,
        cooldown: true,
        consumes_progress: true,
    },
    MissionDescriptor {
        name: MISSION_WORD_WARRIOR,
        source: ProgressSource::MasteredWords,
        scaling: Scaling::Multiplier,
        cooldown: false,
        consumes_progress: false,
    },
    MissionDescriptor {
        name: MISSION_SIGN_MASTER,
        source: ProgressSource::Badges,
        scaling: Scaling::Multiplier,
        cooldown: false,
        consumes_progress: false,
    },
    MissionDescriptor {
        name: MISSION_LEVEL_UP,
        source: ProgressSource::UserLevel,
        scaling: Scaling::Table(LEVEL_UP_TIERS),
        cooldown: true,
        consumes_progress: false,
    },
];

const DAILY_MISSIONS: &[DailyDescriptor] = &[
    DailyDescriptor { name: DAILY_LOGIN, auto_complete: true },
    DailyDescriptor { name: DAILY_QUIZ, auto_complete: true },
    DailyDescriptor { name: DAILY_DICTIONARY, auto_complete: false },
];

/// Look up the descriptor for a long-running mission by its catalog name.
pub fn descriptor(name: &str) -> Option<&'static MissionDescriptor> {
    MISSIONS.iter().find(|d| d.name == name)
}

/// Look up the descriptor for a daily mission by its catalog name.
pub fn daily_descriptor(name: &str) -> Option<&'static DailyDescriptor> {
    DAILY_MISSIONS.iter().find(|d| d.name == name)
}

// ---------------------------------------------------------------------------
// Scaling math
// ---------------------------------------------------------------------------

/// Multiplier applied to base values at the given level (level 1 => 1.0).
pub fn level_multiplier(level: i32) -> f64 {
    1.0 + f64::from(level - 1) * MULTIPLIER_STEP
}

/// Requirement to finish the given level: `round(base * multiplier)`.
pub fn scaled_requirement(base: i32, level: i32) -> i32 {
    (f64::from(base) * level_multiplier(level)).round() as i32
}

/// Reward for finishing the given level: `floor(base * multiplier)`.
pub fn scaled_reward(base: i32, level: i32) -> i32 {
    (f64::from(base) * level_multiplier(level)).floor() as i32
}

/// The user's overall level, derived from accumulated XP.
pub fn user_level(xp: i32) -> i32 {
    xp / XP_PER_LEVEL
}

// ---------------------------------------------------------------------------
// Level-up evaluation
// ---------------------------------------------------------------------------

/// Base values from the `mission` row.
#[derive(Debug, Clone, Copy)]
pub struct MissionBase {
    pub level_requirement: i32,
    pub xp_reward: i32,
    pub points_reward: i32,
    pub badge_reward: Option<i16>,
}

/// Mutable state from the `user_mission_progress` row.
#[derive(Debug, Clone, Copy)]
pub struct ProgressState {
    pub progress_point: i32,
    pub current_level: i32,
    pub current_level_requirement: i32,
    pub current_xp_reward: i32,
    pub current_points_reward: i32,
    pub last_completed_at: Option<Timestamp>,
}

/// The write the caller should perform after a successful evaluation.
///
/// `grant_xp`/`grant_points` are the *pre-update* reward values: the user is
/// paid for the tier just finished, not the newly computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub new_level: i32,
    pub new_requirement: i32,
    pub new_xp_reward: i32,
    pub new_points_reward: i32,
    pub new_progress_point: i32,
    pub grant_xp: i32,
    pub grant_points: i32,
    /// Badge flag (1..=4) to set on the user, if this advance earns one.
    pub grant_badge: Option<i16>,
}

/// Decide whether the mission levels up, and with what values.
///
/// Returns `None` when the requirement is not met, the cooldown has not
/// elapsed, or a fixed-table mission is already at its final tier.
pub fn evaluate_level_up(
    desc: &MissionDescriptor,
    base: &MissionBase,
    state: &ProgressState,
    now: Timestamp,
) -> Option<LevelUp> {
    if state.progress_point < state.current_level_requirement {
        return None;
    }

    if desc.cooldown {
        if let Some(last) = state.last_completed_at {
            if now - last < chrono::Duration::hours(LEVEL_UP_COOLDOWN_HOURS) {
                return None;
            }
        }
    }

    let new_level = state.current_level + 1;

    let (new_requirement, new_xp_reward, new_points_reward) = match desc.scaling {
        Scaling::Multiplier => (
            scaled_requirement(base.level_requirement, new_level),
            scaled_reward(base.xp_reward, new_level),
            scaled_reward(base.points_reward, new_level),
        ),
        Scaling::Table(tiers) => {
            let tier = tiers.iter().find(|t| t.level == new_level)?;
            (tier.requirement, tier.xp_reward, tier.points_reward)
        }
    };

    let new_progress_point = if desc.consumes_progress {
        (state.progress_point - state.current_level_requirement).max(0)
    } else {
        state.progress_point
    };

    // The badge is earned on the first completion of the mission.
    let grant_badge = if state.current_level == 1 {
        base.badge_reward
    } else {
        None
    };

    Some(LevelUp {
        new_level,
        new_requirement,
        new_xp_reward,
        new_points_reward,
        new_progress_point,
        grant_xp: state.current_xp_reward,
        grant_points: state.current_points_reward,
        grant_badge,
    })
}
