//! PPDB (new student admission) campaign model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ppdb` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ppdb {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub contact_info: Option<String>,
    /// Uploaded brochure / requirements document.
    pub document: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePpdb {
    pub title: String,
    pub description: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub contact_info: Option<String>,
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePpdb {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub contact_info: Option<String>,
    pub document: Option<String>,
}
