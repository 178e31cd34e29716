//! Repository for the `ppdb` (admission campaign) table.

use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::ppdb::{CreatePpdb, Ppdb, UpdatePpdb};

const COLUMNS: &str = "id, title, description, start_date, end_date, contact_info, document, \
                       created_at, updated_at";

impl Entity for Ppdb {
    const NAME: &'static str = "Ppdb";
    const TABLE: &'static str = "ppdb";
    const COLUMNS: &'static str = COLUMNS;
    const SEARCH_COLUMN: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn attachment(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

pub struct PpdbRepo;

impl PpdbRepo {
    pub async fn create(pool: &PgPool, input: &CreatePpdb) -> Result<Ppdb, sqlx::Error> {
        let query = format!(
            "INSERT INTO ppdb (title, description, start_date, end_date, contact_info, document)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ppdb>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.contact_info)
            .bind(&input.document)
            .fetch_one(pool)
            .await
    }

    /// Partial update. The `ck_ppdb_window` constraint still rejects a
    /// merged window whose end is not after its start.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePpdb,
    ) -> Result<Option<Ppdb>, sqlx::Error> {
        let query = format!(
            "UPDATE ppdb SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                contact_info = COALESCE($6, contact_info),
                document = COALESCE($7, document)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ppdb>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.contact_info)
            .bind(&input.document)
            .fetch_optional(pool)
            .await
    }
}
