//! Repository for the `teachers` table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};

const COLUMNS: &str = "id, name, subject, photo, created_at, updated_at";

impl Entity for Teacher {
    const NAME: &'static str = "Teacher";
    const TABLE: &'static str = "teachers";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "name";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

pub struct TeacherRepo;

impl TeacherRepo {
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers (name, subject, photo)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(&input.name)
            .bind(&input.subject)
            .bind(&input.photo)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "UPDATE teachers SET
                name = COALESCE($2, name),
                subject = COALESCE($3, subject),
                photo = COALESCE($4, photo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.subject)
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }
}
