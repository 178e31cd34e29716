//! Teacher model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `teachers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: DbId,
    pub name: String,
    pub subject: Option<String>,
    /// Either an uploaded photo URL or an external URL supplied by the client.
    pub photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateTeacher {
    pub name: String,
    pub subject: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTeacher {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub photo: Option<String>,
}
