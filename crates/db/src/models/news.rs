//! News article model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub date: Timestamp,
    pub image: Option<String>,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a news article.
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    /// Defaults to now when omitted.
    pub date: Option<Timestamp>,
    pub image: Option<String>,
    pub author_id: Option<DbId>,
}

/// DTO for updating a news article. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<Timestamp>,
    pub image: Option<String>,
}
