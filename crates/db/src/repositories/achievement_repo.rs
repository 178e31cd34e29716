//! Repository for the `achievements` table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::achievement::{Achievement, CreateAchievement, UpdateAchievement};

const COLUMNS: &str = "id, student_name, title, description, date, category, image, \
                       created_at, updated_at";

impl Entity for Achievement {
    const NAME: &'static str = "Achievement";
    const TABLE: &'static str = "achievements";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

pub struct AchievementRepo;

impl AchievementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAchievement,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements (student_name, title, description, date, category, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(&input.student_name)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.category)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAchievement,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "UPDATE achievements SET
                student_name = COALESCE($2, student_name),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                date = COALESCE($5, date),
                category = COALESCE($6, category),
                image = COALESCE($7, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .bind(&input.student_name)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.category)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }
}
