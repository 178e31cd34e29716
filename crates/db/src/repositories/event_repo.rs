//! Repository for the `events` table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::event::{CreateEvent, Event, UpdateEvent};

const COLUMNS: &str = "id, title, date, location, description, image, created_at, updated_at";

impl Entity for Event {
    const NAME: &'static str = "Event";
    const TABLE: &'static str = "events";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

pub struct EventRepo;

impl EventRepo {
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, date, location, description, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                date = COALESCE($3, date),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                image = COALESCE($6, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.date)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }
}
