//! Mission Engine: translates ledger state into mission progress,
//! completion, and reward grants.
//!
//! Every mission runs through the same routine, parameterized by its
//! descriptor from `signquest_core::missions`. Grants only follow a
//! successful conditional write, so a lost race grants nothing.

use chrono::Utc;
use serde::Serialize;
use signquest_core::error::CoreError;
use signquest_core::missions::{self, LevelUp, MissionDescriptor, ProgressSource};
use signquest_core::streak::{self, StreakOutcome};
use signquest_core::types::DbId;
use sqlx::PgPool;

use signquest_db::models::daily_mission::{DailyMission, DailyMissionProgress};
use signquest_db::models::mission::{Mission, MissionProgress};
use signquest_db::repositories::{
    DailyMissionRepo, DictionaryRepo, MissionRepo, StreakRepo, UserRepo,
};

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A long-running mission joined with the user's (synced) progress.
#[derive(Debug, Serialize)]
pub struct MissionView {
    #[serde(flatten)]
    pub mission: Mission,
    pub progress: MissionProgress,
    /// Present when this read advanced the mission and granted rewards.
    pub leveled_up: Option<LevelUp>,
}

/// A daily mission joined with the user's state for today.
#[derive(Debug, Serialize)]
pub struct DailyMissionView {
    #[serde(flatten)]
    pub mission: DailyMission,
    pub progress: Option<DailyMissionProgress>,
    /// Whether a claim would currently succeed.
    pub claimable: bool,
}

/// Result of a successful daily-mission claim.
#[derive(Debug, Serialize)]
pub struct ClaimOutcome {
    pub points_granted: i32,
    pub xp_granted: i32,
}

/// Result of a login event.
#[derive(Debug, Serialize)]
pub struct LoginSummary {
    /// Current consecutive-login streak after this event.
    pub streak: i32,
    /// Whether this was the first login of the calendar day.
    pub first_of_day: bool,
}

// ---------------------------------------------------------------------------
// Daily missions
// ---------------------------------------------------------------------------

fn auto_completes(mission_name: &str) -> bool {
    missions::daily_descriptor(mission_name)
        .map(|d| d.auto_complete)
        .unwrap_or(true)
}

/// Record one progress event against a daily mission.
///
/// Creates or day-rolls the progress row, increments it (capped at the
/// requirement), and for auto-complete missions marks completion as soon as
/// the requirement is met.
pub async fn touch_daily(
    pool: &PgPool,
    user_id: DbId,
    mission_name: &str,
) -> AppResult<DailyMissionView> {
    let mission = DailyMissionRepo::get_by_name(pool, mission_name)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "daily mission",
            key: mission_name.to_string(),
        })?;

    let mut progress =
        DailyMissionRepo::touch(pool, user_id, mission.id, mission.level_requirement).await?;

    if auto_completes(&mission.name)
        && progress.completed_at.is_none()
        && progress.progress_point >= mission.level_requirement
    {
        if let Some(updated) =
            DailyMissionRepo::mark_completed(pool, progress.id, mission.level_requirement).await?
        {
            tracing::info!(
                user_id,
                mission = %mission.name,
                "Daily mission completed"
            );
            progress = updated;
        }
    }

    let claimable = claimable(&mission, &progress);
    Ok(DailyMissionView {
        mission,
        progress: Some(progress),
        claimable,
    })
}

/// Like [`touch_daily`], but quietly does nothing when the mission is not
/// in the catalog. Used for side-effect touches (quiz answers, dictionary
/// practice, logins) that must not fail the primary action.
pub async fn touch_daily_if_present(pool: &PgPool, user_id: DbId, mission_name: &str) {
    match touch_daily(pool, user_id, mission_name).await {
        Ok(_) => {}
        Err(AppError::Core(CoreError::NotFound { .. })) => {
            tracing::debug!(mission = %mission_name, "Daily mission not configured; skipping");
        }
        Err(e) => {
            // The primary action already succeeded; log and move on.
            tracing::error!(user_id, mission = %mission_name, error = %e, "Daily mission touch failed");
        }
    }
}

fn claimable(mission: &DailyMission, progress: &DailyMissionProgress) -> bool {
    if progress.claimed {
        return false;
    }
    if auto_completes(&mission.name) {
        progress.completed_at.is_some()
    } else {
        progress.progress_point >= mission.level_requirement
    }
}

/// Claim a completed daily mission, granting its fixed rewards exactly once.
///
/// The claim transition is a single conditional update; when it affects no
/// row (not completed, or already claimed) the call fails with 409 and no
/// reward is granted.
pub async fn claim_daily(
    pool: &PgPool,
    user_id: DbId,
    daily_mission_id: DbId,
) -> AppResult<ClaimOutcome> {
    let mission = DailyMissionRepo::get(pool, daily_mission_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "daily mission",
            key: daily_mission_id.to_string(),
        })?;

    let progress = DailyMissionRepo::get_progress(pool, user_id, mission.id)
        .await?
        .ok_or_else(|| CoreError::Conflict("Daily mission not completed yet".into()))?;

    let claimed = if auto_completes(&mission.name) {
        DailyMissionRepo::claim_completed(pool, progress.id).await?
    } else {
        DailyMissionRepo::complete_and_claim(pool, progress.id, mission.level_requirement).await?
    };

    if !claimed {
        return Err(CoreError::Conflict(
            "Daily mission not completed yet or already claimed".into(),
        )
        .into());
    }

    UserRepo::grant_rewards(pool, user_id, mission.points_reward, mission.xp_reward).await?;

    tracing::info!(
        user_id,
        mission = %mission.name,
        points = mission.points_reward,
        xp = mission.xp_reward,
        "Daily mission claimed"
    );

    Ok(ClaimOutcome {
        points_granted: mission.points_reward,
        xp_granted: mission.xp_reward,
    })
}

/// Build the daily-missions overview for a user.
pub async fn daily_overview(pool: &PgPool, user_id: DbId) -> AppResult<Vec<DailyMissionView>> {
    let mut views = Vec::new();
    for mission in DailyMissionRepo::list(pool).await? {
        let progress = DailyMissionRepo::get_progress(pool, user_id, mission.id).await?;
        let claimable = progress
            .as_ref()
            .map(|p| claimable(&mission, p))
            .unwrap_or(false);
        views.push(DailyMissionView {
            mission,
            progress,
            claimable,
        });
    }
    Ok(views)
}

// ---------------------------------------------------------------------------
// Long-running missions
// ---------------------------------------------------------------------------

/// Derive the authoritative progress value for a source-backed mission.
async fn derived_progress(
    pool: &PgPool,
    user_id: DbId,
    source: ProgressSource,
) -> AppResult<Option<i32>> {
    let value = match source {
        // Touch-incremented; nothing to derive.
        ProgressSource::LoginEvents => return Ok(None),
        ProgressSource::MasteredWords => DictionaryRepo::count_mastered(pool, user_id).await? as i32,
        ProgressSource::Badges => {
            let user = UserRepo::get(pool, user_id).await?.ok_or_else(|| {
                CoreError::NotFound {
                    entity: "user",
                    key: user_id.to_string(),
                }
            })?;
            user.badge_count()
        }
        ProgressSource::UserLevel => {
            let user = UserRepo::get(pool, user_id).await?.ok_or_else(|| {
                CoreError::NotFound {
                    entity: "user",
                    key: user_id.to_string(),
                }
            })?;
            missions::user_level(user.xp)
        }
    };
    Ok(Some(value))
}

/// Apply a level-up decision, granting the pre-update rewards on success.
///
/// Returns the fresh progress row and the applied level-up, or the original
/// row when the conditional write lost a race (in which case nothing is
/// granted).
async fn apply_level_up(
    pool: &PgPool,
    user_id: DbId,
    mission: &Mission,
    progress: MissionProgress,
    up: LevelUp,
) -> AppResult<(MissionProgress, Option<LevelUp>)> {
    let Some(advanced) =
        MissionRepo::advance_level(pool, progress.id, progress.current_level, &up).await?
    else {
        tracing::debug!(
            user_id,
            mission = %mission.name,
            "Level-up lost a concurrent race; skipping grant"
        );
        return Ok((progress, None));
    };

    UserRepo::grant_rewards(pool, user_id, up.grant_points, up.grant_xp).await?;
    if let Some(badge) = up.grant_badge {
        UserRepo::set_badge(pool, user_id, badge).await?;
    }

    tracing::info!(
        user_id,
        mission = %mission.name,
        level = advanced.current_level,
        points = up.grant_points,
        xp = up.grant_xp,
        "Mission leveled up"
    );

    Ok((advanced, Some(up)))
}

/// Sync a mission's progress from its source and evaluate a level-up.
///
/// Derived values are written only when they differ from the stored value.
pub async fn sync_mission(
    pool: &PgPool,
    user_id: DbId,
    mission: Mission,
) -> AppResult<MissionView> {
    let mut progress = MissionRepo::get_or_create_progress(pool, user_id, &mission).await?;

    let Some(desc) = missions::descriptor(&mission.name) else {
        // Unknown to the descriptor table: surface raw progress, no grants.
        return Ok(MissionView {
            mission,
            progress,
            leveled_up: None,
        });
    };

    if let Some(value) = derived_progress(pool, user_id, desc.source).await? {
        if value != progress.progress_point {
            progress = MissionRepo::set_progress_point(pool, progress.id, value).await?;
        }
    }

    evaluate_mission(pool, user_id, desc, mission, progress).await
}

async fn evaluate_mission(
    pool: &PgPool,
    user_id: DbId,
    desc: &MissionDescriptor,
    mission: Mission,
    progress: MissionProgress,
) -> AppResult<MissionView> {
    match missions::evaluate_level_up(desc, &mission.base(), &progress.state(), Utc::now()) {
        Some(up) => {
            let (progress, leveled_up) =
                apply_level_up(pool, user_id, &mission, progress, up).await?;
            Ok(MissionView {
                mission,
                progress,
                leveled_up,
            })
        }
        None => Ok(MissionView {
            mission,
            progress,
            leveled_up: None,
        }),
    }
}

/// Build the missions overview, syncing every mission as it is read.
pub async fn mission_overview(pool: &PgPool, user_id: DbId) -> AppResult<Vec<MissionView>> {
    let mut views = Vec::new();
    for mission in MissionRepo::list(pool).await? {
        views.push(sync_mission(pool, user_id, mission).await?);
    }
    Ok(views)
}

// ---------------------------------------------------------------------------
// Login event
// ---------------------------------------------------------------------------

/// Process a login: advance the login streak, credit the "Login Streak!"
/// mission, and touch the daily login mission. All of it happens only on
/// the first login of the calendar day.
pub async fn login_event(pool: &PgPool, user_id: DbId) -> AppResult<LoginSummary> {
    let record = StreakRepo::get_or_create_login(pool, user_id).await?;
    let today = Utc::now().date_naive();

    let new_streak = match streak::advance(record.last_login_date, record.current_streak, today) {
        StreakOutcome::Unchanged => {
            return Ok(LoginSummary {
                streak: record.current_streak,
                first_of_day: false,
            });
        }
        StreakOutcome::Advanced(n) => n,
    };

    // The date guard makes this a no-op if a concurrent request won.
    if !StreakRepo::advance_login(pool, user_id, new_streak).await? {
        return Ok(LoginSummary {
            streak: new_streak,
            first_of_day: false,
        });
    }

    // First login of the day: credit the long-running mission...
    if let Some(mission) = MissionRepo::get_by_name(pool, missions::MISSION_LOGIN_STREAK).await? {
        let progress = MissionRepo::get_or_create_progress(pool, user_id, &mission).await?;
        let progress = MissionRepo::increment_progress(pool, progress.id).await?;
        if let Some(desc) = missions::descriptor(&mission.name) {
            evaluate_mission(pool, user_id, desc, mission, progress).await?;
        }
    }

    // ...and the daily one.
    touch_daily_if_present(pool, user_id, missions::DAILY_LOGIN).await;

    Ok(LoginSummary {
        streak: new_streak,
        first_of_day: true,
    })
}

// ---------------------------------------------------------------------------
// Quiz answer side effects
// ---------------------------------------------------------------------------

/// Side effects of a first-time correct answer: advance the answer streak,
/// raise the user's longest streak when exceeded, and touch the daily quiz
/// mission. Returns the current answer streak.
pub async fn on_first_correct_answer(pool: &PgPool, user_id: DbId) -> AppResult<i32> {
    let record = StreakRepo::get_or_create_level(pool, user_id).await?;
    let today = Utc::now().date_naive();

    let current = match streak::advance(record.last_answer_date, record.current_streak, today) {
        StreakOutcome::Unchanged => record.current_streak,
        StreakOutcome::Advanced(n) => {
            if StreakRepo::advance_level(pool, user_id, n).await? {
                UserRepo::bump_longest_streak(pool, user_id, n).await?;
            }
            n
        }
    };

    touch_daily_if_present(pool, user_id, missions::DAILY_QUIZ).await;

    Ok(current)
}
