//! Generic access for content tables that share the list / get / delete shape.
//!
//! Every content table has an id, a designated search column, timestamps and
//! at most one attachment reference. Per-table repositories only implement
//! `create` and `update`; everything else goes through [`EntityRepo`].

use schoolcms_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

/// A row type backed by a single content table.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Name used in not-found messages (e.g. `"News"`).
    const NAME: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// Column list returned by every query.
    const COLUMNS: &'static str;
    /// Text column matched by `?search=`.
    const SEARCH_COLUMN: &'static str;

    fn id(&self) -> DbId;

    /// Reference to the file owned by this row, if any.
    fn attachment(&self) -> Option<&str>;
}

/// Build an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// taken literally.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Shared list / get / delete queries for any [`Entity`].
pub struct EntityRepo;

impl EntityRepo {
    /// List rows newest first, optionally filtered by a case-insensitive
    /// substring match on the entity's search column.
    pub async fn list<E: Entity>(pool: &PgPool, search: Option<&str>) -> Result<Vec<E>, sqlx::Error> {
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let query = format!(
                    "SELECT {} FROM {} WHERE {} ILIKE $1 ORDER BY created_at DESC, id DESC",
                    E::COLUMNS,
                    E::TABLE,
                    E::SEARCH_COLUMN
                );
                sqlx::query_as::<_, E>(&query)
                    .bind(contains_pattern(term))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {} FROM {} ORDER BY created_at DESC, id DESC",
                    E::COLUMNS,
                    E::TABLE
                );
                sqlx::query_as::<_, E>(&query).fetch_all(pool).await
            }
        }
    }

    /// Find a row by id.
    pub async fn find_by_id<E: Entity>(pool: &PgPool, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", E::COLUMNS, E::TABLE);
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a row, returning it as it was. `None` if no row had this id.
    pub async fn delete<E: Entity>(pool: &PgPool, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            E::TABLE,
            E::COLUMNS
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
