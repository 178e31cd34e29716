//! School event model and DTOs.

use schoolcms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub date: Option<Timestamp>,
    pub location: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub date: Option<Timestamp>,
    pub location: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub date: Option<Timestamp>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}
