//! Integration tests for school statistics: summaries and the all-or-nothing
//! oldest-first decrement.

use assert_matches::assert_matches;
use schoolcms_core::error::CoreError;
use schoolcms_core::school_info::Major;
use schoolcms_db::models::school_info::{CreateSchoolInfo, UpdateSchoolInfo};
use schoolcms_db::repositories::{DecreaseError, SchoolInfoRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed(pool: &PgPool, major: Major, counts: &[i32]) {
    for &total_students in counts {
        SchoolInfoRepo::create(
            pool,
            &CreateSchoolInfo {
                total_students,
                major: major.as_str().to_string(),
            },
        )
        .await
        .unwrap();
    }
}

async fn counts_for(pool: &PgPool, major: Major) -> Vec<i32> {
    SchoolInfoRepo::list_by_major(pool, major)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.total_students)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn decrease_drains_oldest_rows_first(pool: PgPool) {
    seed(&pool, Major::Science, &[10, 5, 20]).await;

    let outcome = SchoolInfoRepo::decrease_by_major(&pool, Major::Science, 12)
        .await
        .unwrap();

    let after: Vec<i32> = outcome.records.iter().map(|r| r.total_students).collect();
    assert_eq!(after, vec![0, 3, 20]);
    assert_eq!(after.iter().sum::<i32>(), 23);
    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(counts_for(&pool, Major::Science).await, vec![0, 3, 20]);
}

#[sqlx::test(migrations = "./migrations")]
async fn decrease_leaves_other_majors_alone(pool: PgPool) {
    seed(&pool, Major::Science, &[10]).await;
    seed(&pool, Major::Social, &[7]).await;

    SchoolInfoRepo::decrease_by_major(&pool, Major::Science, 4)
        .await
        .unwrap();

    assert_eq!(counts_for(&pool, Major::Science).await, vec![6]);
    assert_eq!(counts_for(&pool, Major::Social).await, vec![7]);
}

#[sqlx::test(migrations = "./migrations")]
async fn insufficient_capacity_writes_nothing(pool: PgPool) {
    seed(&pool, Major::Language, &[3, 2]).await;

    let result = SchoolInfoRepo::decrease_by_major(&pool, Major::Language, 9).await;
    assert_matches!(
        result,
        Err(DecreaseError::Rejected(CoreError::InsufficientCapacity { remaining: 4, .. }))
    );

    assert_eq!(counts_for(&pool, Major::Language).await, vec![3, 2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn decrease_without_rows_is_no_matches(pool: PgPool) {
    seed(&pool, Major::Science, &[10]).await;

    let result = SchoolInfoRepo::decrease_by_major(&pool, Major::Religion, 1).await;
    assert_matches!(
        result,
        Err(DecreaseError::Rejected(CoreError::NoMatches { .. }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn decrease_rejects_non_positive_amount(pool: PgPool) {
    seed(&pool, Major::Science, &[10]).await;

    let result = SchoolInfoRepo::decrease_by_major(&pool, Major::Science, 0).await;
    assert_matches!(result, Err(DecreaseError::Rejected(CoreError::Validation(_))));
    assert_eq!(counts_for(&pool, Major::Science).await, vec![10]);
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_sums_fragmented_majors(pool: PgPool) {
    seed(&pool, Major::Science, &[10, 5]).await;
    seed(&pool, Major::Vocational, &[8]).await;

    let totals = SchoolInfoRepo::summary(&pool).await.unwrap();
    let pairs: Vec<(String, i64)> = totals
        .into_iter()
        .map(|t| (t.major, t.total_students))
        .collect();

    assert_eq!(
        pairs,
        vec![("SCIENCE".to_string(), 15), ("VOCATIONAL".to_string(), 8)]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_of_empty_table_is_empty(pool: PgPool) {
    assert!(SchoolInfoRepo::summary(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_keeps_omitted_fields(pool: PgPool) {
    let created = SchoolInfoRepo::create(
        &pool,
        &CreateSchoolInfo {
            total_students: 30,
            major: "SOCIAL".to_string(),
        },
    )
    .await
    .unwrap();

    let updated = SchoolInfoRepo::update(
        &pool,
        created.id,
        &UpdateSchoolInfo {
            total_students: Some(25),
            major: None,
        },
    )
    .await
    .unwrap()
    .expect("row should exist");

    assert_eq!(updated.total_students, 25);
    assert_eq!(updated.major, "SOCIAL");

    let missing = SchoolInfoRepo::update(&pool, created.id + 1000, &UpdateSchoolInfo::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn negative_count_violates_check(pool: PgPool) {
    let result = SchoolInfoRepo::create(
        &pool,
        &CreateSchoolInfo {
            total_students: -1,
            major: "SCIENCE".to_string(),
        },
    )
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_decreases_never_oversubtract(pool: PgPool) {
    seed(&pool, Major::Language, &[10, 10]).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move {
                SchoolInfoRepo::decrease_by_major(&pool, Major::Language, 3).await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_matches!(
                err,
                DecreaseError::Rejected(CoreError::InsufficientCapacity { .. })
            ),
        }
    }

    let after = counts_for(&pool, Major::Language).await;
    assert!(after.iter().all(|&n| n >= 0), "negative count in {after:?}");
    assert_eq!(after.iter().sum::<i32>(), 20 - 3 * successes);
    assert_eq!(successes, 6);
}
