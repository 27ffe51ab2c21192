//! Motivational quote model.

use serde::Serialize;
use signquest_core::types::DbId;
use sqlx::FromRow;

/// A row from the `quote` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub text: String,
    pub author: String,
}
