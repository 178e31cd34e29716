//! Repository for the `news` table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::news::{CreateNews, News, UpdateNews};

const COLUMNS: &str = "id, title, content, date, image, author_id, created_at, updated_at";

impl Entity for News {
    const NAME: &'static str = "News";
    const TABLE: &'static str = "news";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Provides insert and update for news articles.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a new article. A missing `date` defaults to the current time.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, content, date, image, author_id)
             VALUES ($1, $2, COALESCE($3, NOW()), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.date)
            .bind(&input.image)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                date = COALESCE($4, date),
                image = COALESCE($5, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.date)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }
}
