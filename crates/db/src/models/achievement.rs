//! Student achievement model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `achievements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: DbId,
    pub student_name: String,
    pub title: String,
    pub description: String,
    pub date: Option<Timestamp>,
    /// One of `ACADEMIC`, `SPORTS`, `ARTS`.
    pub category: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAchievement {
    pub student_name: String,
    pub title: String,
    pub description: String,
    pub date: Option<Timestamp>,
    pub category: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAchievement {
    pub student_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<Timestamp>,
    pub category: Option<String>,
    pub image: Option<String>,
}
