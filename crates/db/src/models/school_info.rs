//! School statistics model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `school_info` table: part of one major's enrolment.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    pub id: DbId,
    pub total_students: i32,
    pub major: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Enrolment summed over every row of one major.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorTotal {
    pub major: String,
    pub total_students: i64,
}

#[derive(Debug, Clone)]
pub struct CreateSchoolInfo {
    pub total_students: i32,
    pub major: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSchoolInfo {
    pub total_students: Option<i32>,
    pub major: Option<String>,
}
