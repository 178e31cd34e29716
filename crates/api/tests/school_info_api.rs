//! HTTP-level tests for the enrolment statistics endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, seed_user, TestApp};
use serde_json::json;
use sqlx::PgPool;

async fn create_record(app: &TestApp, token: &str, major: &str, total: i64) -> i64 {
    let response = app
        .json(
            Method::POST,
            "/school-info",
            Some(token),
            json!({ "major": major, "totalStudents": total }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn counts(records: &serde_json::Value) -> Vec<i64> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["totalStudents"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn decrease_drains_oldest_records_first(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    for total in [10, 5, 20] {
        create_record(&app, &token, "SCIENCE", total).await;
    }
    create_record(&app, &token, "SOCIAL", 7).await;

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "SCIENCE", "amount": 12 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Successfully decreased 12 students from major SCIENCE");
    assert_eq!(counts(&json["data"]), vec![0, 3, 20]);

    let json = body_json(app.get("/school-info", None).await).await;
    assert_eq!(json["data"]["totalStudents"], 30);
    assert_eq!(json["data"]["studentsByMajor"]["SCIENCE"], 23);
    assert_eq!(json["data"]["studentsByMajor"]["SOCIAL"], 7);
    assert_eq!(json["data"]["records"].as_array().unwrap().len(), 4);

    let json = body_json(app.get("/school-info?major=SOCIAL", None).await).await;
    assert_eq!(json["data"]["totalStudents"], 7);
    assert_eq!(counts(&json["data"]["records"]), vec![7]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whole_float_amounts_are_accepted(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    create_record(&app, &token, "SCIENCE", 10).await;

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "SCIENCE", "amount": 4.0 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counts(&body_json(response).await["data"]), vec![6]);

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "SCIENCE", "amount": 1.5 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn decrease_beyond_capacity_changes_nothing(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    create_record(&app, &token, "LANGUAGE", 3).await;
    create_record(&app, &token, "LANGUAGE", 2).await;

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "LANGUAGE", "amount": 9 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], false);
    assert_eq!(json["code"], "INSUFFICIENT_CAPACITY");

    let json = body_json(app.get("/school-info?major=LANGUAGE", None).await).await;
    assert_eq!(counts(&json["data"]["records"]), vec![3, 2]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn decrease_input_errors(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            None,
            json!({ "major": "SCIENCE", "amount": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "RELIGION", "amount": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        "No records found for major RELIGION"
    );

    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "ENGINEERING", "amount": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    create_record(&app, &token, "SCIENCE", 5).await;
    let response = app
        .json(
            Method::PATCH,
            "/school-info/decrease",
            Some(&token),
            json!({ "major": "SCIENCE", "amount": 0 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_update_validate_counts(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let response = app
        .json(
            Method::POST,
            "/school-info/create",
            Some(&token),
            json!({ "major": "SOCIAL", "totalStudents": -1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let id = create_record(&app, &token, "SOCIAL", 40).await;

    let response = app
        .json(
            Method::PUT,
            &format!("/school-info/{id}"),
            Some(&token),
            json!({ "totalStudents": 42 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalStudents"], 42);
    assert_eq!(json["data"]["major"], "SOCIAL");

    let response = app
        .json(
            Method::PUT,
            "/school-info/999999",
            Some(&token),
            json!({ "totalStudents": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_totals_per_major(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let json = body_json(app.get("/school-info/summary", None).await).await;
    assert_eq!(json["data"]["totalStudents"], 0);
    assert_eq!(json["data"]["perMajor"].as_array().unwrap().len(), 0);

    create_record(&app, &token, "SOCIAL", 4).await;
    create_record(&app, &token, "SCIENCE", 10).await;
    create_record(&app, &token, "SCIENCE", 6).await;

    let json = body_json(app.get("/school-info/summary", None).await).await;
    assert_eq!(json["data"]["totalStudents"], 20);
    assert_eq!(
        json["data"]["perMajor"],
        json!([
            { "major": "SCIENCE", "totalStudents": 16 },
            { "major": "SOCIAL", "totalStudents": 4 },
        ])
    );
}
