//! Nightly reset of daily-mission progress.
//!
//! Spawns a loop that sleeps until the next local midnight, then zeroes
//! every `user_daily_mission_progress` row. The reset statement is
//! idempotent, so a re-run (or an overlapping trigger via the jobs
//! endpoint) leaves the same end state. Runs until `cancel` is triggered.

use chrono::{Local, NaiveDateTime};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use signquest_db::repositories::DailyMissionRepo;

/// Seconds from `now` until the next midnight.
fn secs_until_next_midnight(now: NaiveDateTime) -> u64 {
    let next_midnight = (now.date() + chrono::Days::new(1)).and_time(chrono::NaiveTime::MIN);
    (next_midnight - now).num_seconds().max(1) as u64
}

/// Run the daily reset loop.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!("Daily mission reset job started");

    loop {
        let sleep_secs = secs_until_next_midnight(Local::now().naive_local());
        tracing::debug!(sleep_secs, "Daily reset sleeping until local midnight");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily mission reset job stopping");
                break;
            }
            _ = tokio::time::sleep(std::time::Duration::from_secs(sleep_secs)) => {
                match DailyMissionRepo::reset_all(&pool).await {
                    Ok(rows) => {
                        tracing::info!(rows, "Daily mission progress reset");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Daily mission reset failed");
                    }
                }
            }
        }
    }
}
