//! Repository for the `quote` table.

use sqlx::PgPool;

use crate::models::quote::Quote;

/// Provides reads for motivational quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// A random quote, or `None` when the table is empty.
    pub async fn random(pool: &PgPool) -> Result<Option<Quote>, sqlx::Error> {
        sqlx::query_as::<_, Quote>(
            "SELECT id, text, author FROM quote ORDER BY random() LIMIT 1",
        )
        .fetch_optional(pool)
        .await
    }
}
