//! Repository for the `school_activities` table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::school_activity::{
    CreateSchoolActivity, SchoolActivity, UpdateSchoolActivity,
};

const COLUMNS: &str = "id, title, description, date, media, image, created_at, updated_at";

impl Entity for SchoolActivity {
    const NAME: &'static str = "SchoolActivity";
    const TABLE: &'static str = "school_activities";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

pub struct SchoolActivityRepo;

impl SchoolActivityRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSchoolActivity,
    ) -> Result<SchoolActivity, sqlx::Error> {
        let query = format!(
            "INSERT INTO school_activities (title, description, date, media, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolActivity>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.media)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchoolActivity,
    ) -> Result<Option<SchoolActivity>, sqlx::Error> {
        let query = format!(
            "UPDATE school_activities SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                media = COALESCE($5, media),
                image = COALESCE($6, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolActivity>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.media)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }
}
