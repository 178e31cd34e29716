//! Repository for the `school_info` table.
//!
//! A major's enrolment may be spread over several rows; decrements drain
//! them oldest first inside one transaction.

use schoolcms_core::error::CoreError;
use schoolcms_core::school_info::{plan_decrease, DecreaseStep, Major, MajorCount};
use schoolcms_core::types::DbId;
use sqlx::PgPool;

use crate::models::school_info::{CreateSchoolInfo, MajorTotal, SchoolInfo, UpdateSchoolInfo};

const COLUMNS: &str = "id, total_students, major, created_at, updated_at";

/// Failure of [`SchoolInfoRepo::decrease_by_major`].
#[derive(Debug, thiserror::Error)]
pub enum DecreaseError {
    /// The plan was rejected (bad amount, no rows, not enough students).
    /// Nothing was written.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result of a committed decrement.
#[derive(Debug, Clone)]
pub struct DecreaseOutcome {
    /// Rows whose count changed, oldest first.
    pub steps: Vec<DecreaseStep>,
    /// Every row of the major after the update, oldest first.
    pub records: Vec<SchoolInfo>,
}

/// Provides CRUD, aggregation and decrement operations for school statistics.
pub struct SchoolInfoRepo;

impl SchoolInfoRepo {
    /// List every record, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<SchoolInfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM school_info ORDER BY id ASC");
        sqlx::query_as::<_, SchoolInfo>(&query).fetch_all(pool).await
    }

    /// List the records of one major, oldest first.
    pub async fn list_by_major(pool: &PgPool, major: Major) -> Result<Vec<SchoolInfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM school_info WHERE major = $1 ORDER BY id ASC");
        sqlx::query_as::<_, SchoolInfo>(&query)
            .bind(major.as_str())
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SchoolInfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM school_info WHERE id = $1");
        sqlx::query_as::<_, SchoolInfo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateSchoolInfo,
    ) -> Result<SchoolInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO school_info (total_students, major)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolInfo>(&query)
            .bind(input.total_students)
            .bind(&input.major)
            .fetch_one(pool)
            .await
    }

    /// Update a record. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSchoolInfo,
    ) -> Result<Option<SchoolInfo>, sqlx::Error> {
        let query = format!(
            "UPDATE school_info SET
                total_students = COALESCE($2, total_students),
                major = COALESCE($3, major)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolInfo>(&query)
            .bind(id)
            .bind(input.total_students)
            .bind(&input.major)
            .fetch_optional(pool)
            .await
    }

    /// Per-major totals, ordered by major name. Majors without rows are absent.
    pub async fn summary(pool: &PgPool) -> Result<Vec<MajorTotal>, sqlx::Error> {
        sqlx::query_as::<_, MajorTotal>(
            "SELECT major, COALESCE(SUM(total_students), 0)::BIGINT AS total_students
             FROM school_info
             GROUP BY major
             ORDER BY major",
        )
        .fetch_all(pool)
        .await
    }

    /// Subtract `amount` students from `major`, draining the oldest rows first.
    ///
    /// The major's rows are locked with `FOR UPDATE` for the duration of the
    /// transaction, so concurrent decrements of the same major serialise.
    /// If the plan is rejected nothing is written.
    pub async fn decrease_by_major(
        pool: &PgPool,
        major: Major,
        amount: i64,
    ) -> Result<DecreaseOutcome, DecreaseError> {
        let mut tx = pool.begin().await?;

        let locked: Vec<(DbId, i32)> = sqlx::query_as(
            "SELECT id, total_students FROM school_info
             WHERE major = $1
             ORDER BY id ASC
             FOR UPDATE",
        )
        .bind(major.as_str())
        .fetch_all(&mut *tx)
        .await?;

        let counts: Vec<MajorCount> = locked
            .into_iter()
            .map(|(id, total_students)| MajorCount { id, total_students })
            .collect();

        let steps = match plan_decrease(major, &counts, amount) {
            Ok(steps) => steps,
            Err(e) => {
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        for step in &steps {
            sqlx::query("UPDATE school_info SET total_students = $2 WHERE id = $1")
                .bind(step.id)
                .bind(step.after)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!("SELECT {COLUMNS} FROM school_info WHERE major = $1 ORDER BY id ASC");
        let records = sqlx::query_as::<_, SchoolInfo>(&query)
            .bind(major.as_str())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DecreaseOutcome { steps, records })
    }
}
