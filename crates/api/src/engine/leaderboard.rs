//! Leaderboard cache: serves the ranked user list without hitting the
//! store on every request.
//!
//! One instance lives in [`crate::state::AppState`] for the process
//! lifetime. Reads within the TTL return the cached snapshot unchanged;
//! the first read after expiry refetches and replaces it. Point mutations
//! elsewhere do not invalidate the cache; staleness up to the TTL is
//! accepted.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use signquest_core::types::DbId;
use sqlx::PgPool;
use tokio::sync::RwLock;

use signquest_db::models::leaderboard::LeaderboardRow;
use signquest_db::repositories::UserRepo;

/// One leaderboard entry with its assigned 1-based rank.
#[derive(Debug, Clone, Serialize)]
pub struct RankedUser {
    pub id: DbId,
    pub username: String,
    pub points: i32,
    pub xp: i32,
    pub profile_photo: Option<String>,
    pub rank: i32,
}

/// Assign 1-based ranks to rows already sorted by the store.
pub fn assign_ranks(rows: Vec<LeaderboardRow>) -> Vec<RankedUser> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| RankedUser {
            id: row.id,
            username: row.username,
            points: row.points,
            xp: row.xp,
            profile_photo: row.profile_photo,
            rank: i as i32 + 1,
        })
        .collect()
}

struct Snapshot {
    users: Arc<Vec<RankedUser>>,
    refreshed_at: Instant,
}

fn is_fresh(snapshot: &Snapshot, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(snapshot.refreshed_at) < ttl
}

/// TTL-refreshed cache of the full ranked user list.
pub struct LeaderboardCache {
    ttl: Duration,
    inner: RwLock<Option<Snapshot>>,
}

impl LeaderboardCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
        }
    }

    /// The ranked user list, served from cache while fresh.
    ///
    /// Never fails: when the refresh query errors, the previous snapshot is
    /// served if one exists, otherwise an empty list.
    pub async fn ranked(&self, pool: &PgPool) -> Arc<Vec<RankedUser>> {
        self.ranked_at(pool, Instant::now()).await
    }

    /// A specific user's entry, or `None` when absent from the board.
    pub async fn rank_of(&self, pool: &PgPool, user_id: DbId) -> Option<RankedUser> {
        self.ranked(pool)
            .await
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }

    /// Drop the snapshot; the next read refetches.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// Clock-explicit variant of [`Self::ranked`], used by tests.
    pub async fn ranked_at(&self, pool: &PgPool, now: Instant) -> Arc<Vec<RankedUser>> {
        {
            let guard = self.inner.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if is_fresh(snapshot, now, self.ttl) {
                    return Arc::clone(&snapshot.users);
                }
            }
        }

        let mut guard = self.inner.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(snapshot) = guard.as_ref() {
            if is_fresh(snapshot, now, self.ttl) {
                return Arc::clone(&snapshot.users);
            }
        }

        match UserRepo::list_ranked(pool).await {
            Ok(rows) => {
                let users = Arc::new(assign_ranks(rows));
                *guard = Some(Snapshot {
                    users: Arc::clone(&users),
                    refreshed_at: now,
                });
                users
            }
            Err(e) => {
                tracing::warn!(error = %e, "Leaderboard refresh failed; serving previous snapshot");
                guard
                    .as_ref()
                    .map(|s| Arc::clone(&s.users))
                    .unwrap_or_default()
            }
        }
    }
}
