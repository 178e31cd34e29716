//! Alumni testimony model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `testimonies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimony {
    pub id: DbId,
    pub alumni_name: String,
    pub testimony: String,
    pub graduation_year: Option<i32>,
    pub photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateTestimony {
    pub alumni_name: String,
    pub testimony: String,
    pub graduation_year: Option<i32>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTestimony {
    pub alumni_name: Option<String>,
    pub testimony: Option<String>,
    pub graduation_year: Option<i32>,
    pub photo: Option<String>,
}
