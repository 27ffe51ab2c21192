//! Shared helpers for repository integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use signquest_core::types::DbId;
use sqlx::PgPool;

/// Insert a bare user and return its id.
pub async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO users (username, email) VALUES ($1, $1 || '@example.com') RETURNING id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("failed to insert test user");
    row.0
}

/// Fetch a user's `(points, xp)` totals.
pub async fn user_totals(pool: &PgPool, user_id: DbId) -> (i32, i32) {
    sqlx::query_as("SELECT points, xp FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("failed to fetch user totals")
}
