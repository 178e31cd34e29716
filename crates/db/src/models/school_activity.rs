//! School activity model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `school_activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolActivity {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub date: Option<Timestamp>,
    /// Free-form link to external media (video, gallery).
    pub media: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateSchoolActivity {
    pub title: String,
    pub description: String,
    pub date: Option<Timestamp>,
    pub media: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSchoolActivity {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<Timestamp>,
    pub media: Option<String>,
    pub image: Option<String>,
}
