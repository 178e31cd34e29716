//! Repository for the `testimonies` table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::testimony::{CreateTestimony, Testimony, UpdateTestimony};

const COLUMNS: &str = "id, alumni_name, testimony, graduation_year, photo, created_at, updated_at";

impl Entity for Testimony {
    const NAME: &'static str = "Testimony";
    const TABLE: &'static str = "testimonies";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "alumni_name";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

pub struct TestimonyRepo;

impl TestimonyRepo {
    pub async fn create(pool: &PgPool, input: &CreateTestimony) -> Result<Testimony, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonies (alumni_name, testimony, graduation_year, photo)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimony>(&query)
            .bind(&input.alumni_name)
            .bind(&input.testimony)
            .bind(input.graduation_year)
            .bind(&input.photo)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimony,
    ) -> Result<Option<Testimony>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonies SET
                alumni_name = COALESCE($2, alumni_name),
                testimony = COALESCE($3, testimony),
                graduation_year = COALESCE($4, graduation_year),
                photo = COALESCE($5, photo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimony>(&query)
            .bind(id)
            .bind(&input.alumni_name)
            .bind(&input.testimony)
            .bind(input.graduation_year)
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }
}
