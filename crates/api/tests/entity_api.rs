//! HTTP-level tests for the content resources: CRUD round trips, attachment
//! lifecycle, search and per-resource access rules.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, seed_user, MultipartBody, TestApp};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_id_gets_error_envelope(pool: PgPool) {
    let admin = seed_user(&pool, "admin@sekolah.id", "ADMIN").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&admin);

    for uri in ["/news/abc", "/teacher/1.5", "/school-info/x"] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["status"], false, "{uri}");
        assert_eq!(json["code"], "BAD_REQUEST", "{uri}");
    }

    let response = app.delete("/news/abc", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn news_round_trip(pool: PgPool) {
    let admin = seed_user(&pool, "admin@sekolah.id", "ADMIN").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&admin);

    let form = MultipartBody::new()
        .text("title", "Upacara <b>Hari</b> Pahlawan")
        .text("content", "<p>Seluruh siswa hadir</p><script>alert(1)</script>")
        .png("picture");
    let response = app
        .multipart(Method::POST, "/news/create", Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], true);
    assert_eq!(json["message"], "News created successfully");
    assert_eq!(json["data"]["title"], "Upacara Hari Pahlawan");
    assert_eq!(json["data"]["content"], "<p>Seluruh siswa hadir</p>");
    assert_eq!(json["data"]["authorId"], admin.id);
    let id = json["data"]["id"].as_i64().unwrap();
    let image = json["data"]["image"].as_str().unwrap().to_string();
    assert!(image.starts_with("http://localhost:9000/public/news_images/"));
    assert!(app.upload_path(&image).exists());

    let response = app.get(&format!("/news/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let response = app
        .json(
            Method::PUT,
            &format!("/news/{id}"),
            Some(&token),
            json!({ "title": "Upacara Bendera" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Upacara Bendera");
    assert_eq!(json["data"]["image"], image.as_str(), "omitted fields keep their value");

    let response = app.delete(&format!("/news/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], format!("News with id {id} has been deleted"));
    assert!(!app.upload_path(&image).exists(), "attachment removed with the row");

    let response = app.get(&format!("/news/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn news_mutations_require_admin(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let body = json!({ "title": "Libur", "content": "Libur semester" });

    let response = app
        .json(Method::POST, "/news/create", None, body.clone())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = app.token_for(&staff);
    let response = app
        .json(Method::POST, "/news/create", Some(&token), body)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_required_field_is_rejected(pool: PgPool) {
    let admin = seed_user(&pool, "admin@sekolah.id", "ADMIN").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&admin);

    let response = app
        .json(Method::POST, "/news/create", Some(&token), json!({ "title": "Tanpa isi" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], false);
    assert_eq!(json["message"], "content is required");
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn replacing_an_image_deletes_the_previous_file(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let form = MultipartBody::new()
        .text("studentName", "Siti")
        .text("title", "Juara 1 Olimpiade Matematika")
        .text("description", "Tingkat provinsi")
        .text("category", "ACADEMIC")
        .png("image");
    let response = app
        .multipart(Method::POST, "/achievement/create", Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let first = json["data"]["image"].as_str().unwrap().to_string();

    let form = MultipartBody::new().png("image");
    let response = app
        .multipart(Method::PUT, &format!("/achievement/{id}"), Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let second = json["data"]["image"].as_str().unwrap().to_string();

    assert_ne!(first, second);
    assert!(!app.upload_path(&first).exists());
    assert!(app.upload_path(&second).exists());
    assert_eq!(json["data"]["title"], "Juara 1 Olimpiade Matematika");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_file_type_is_rejected(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let form = MultipartBody::new()
        .text("title", "Pentas Seni")
        .text("location", "Aula")
        .text("description", "Pentas tahunan")
        .file("image", "poster.pdf", "application/pdf", b"%PDF-1.4");
    let response = app
        .multipart(Method::POST, "/event/create", Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(app.get("/event", None).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_file_field_is_rejected(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let form = MultipartBody::new()
        .text("alumniName", "Budi")
        .text("testimony", "Sekolah terbaik")
        .png("image");
    let response = app
        .multipart(Method::POST, "/testimony/create", Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Search and validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_search_term(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    for title in ["Pentas Seni", "Class Meeting", "Pentas Musik"] {
        let response = app
            .json(
                Method::POST,
                "/event/create",
                Some(&token),
                json!({ "title": title, "location": "Aula", "description": "Acara sekolah" }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(app.get("/event?search=pentas", None).await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Pentas Musik", "Pentas Seni"]);

    let json = body_json(app.get("/event?search=%20", None).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3, "blank search lists everything");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn graduation_year_must_be_plausible(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let response = app
        .json(
            Method::POST,
            "/testimony/create",
            Some(&token),
            json!({ "alumniName": "Budi", "testimony": "Terima kasih", "graduationYear": 1850 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .json(
            Method::POST,
            "/testimony/create",
            Some(&token),
            json!({ "alumniName": "Budi", "testimony": "Terima kasih", "graduationYear": 2015 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["graduationYear"], 2015);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ppdb_window_checked_against_stored_dates(pool: PgPool) {
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&staff);

    let response = app
        .json(
            Method::POST,
            "/ppdb/create",
            Some(&token),
            json!({
                "title": "PPDB 2026",
                "description": "Penerimaan siswa baru",
                "startDate": "2026-06-01",
                "endDate": "2026-05-01",
                "contactInfo": "0812-0000-0000",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let form = MultipartBody::new()
        .text("title", "PPDB 2026")
        .text("description", "Penerimaan siswa baru")
        .text("startDate", "2026-06-01")
        .text("endDate", "2026-07-01")
        .text("contactInfo", "0812-0000-0000")
        .file("document", "brosur.pdf", "application/pdf", b"%PDF-1.4 brosur");
    let response = app
        .multipart(Method::POST, "/ppdb/create", Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert!(json["data"]["document"]
        .as_str()
        .unwrap()
        .contains("/public/ppdb_documents/"));

    let response = app
        .json(
            Method::PUT,
            &format!("/ppdb/{id}"),
            Some(&token),
            json!({ "endDate": "2026-05-15" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "End date must be after start date"
    );
}

// ---------------------------------------------------------------------------
// Teachers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn teacher_access_rules(pool: PgPool) {
    let admin = seed_user(&pool, "admin@sekolah.id", "ADMIN").await;
    let staff = seed_user(&pool, "staff@sekolah.id", "STAFF").await;
    let app = TestApp::new(pool);
    let admin_token = app.token_for(&admin);
    let staff_token = app.token_for(&staff);

    let response = app.get("/teacher", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "name": "Pak Ahmad", "subject": "Fisika", "photo": "https://cdn.example.org/ahmad.jpg" });
    let response = app
        .json(Method::POST, "/teacher", Some(&staff_token), body.clone())
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .json(Method::POST, "/teacher", Some(&admin_token), body)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["photo"], "https://cdn.example.org/ahmad.jpg");

    let response = app.get("/teacher", Some(&staff_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn teacher_photo_url_replaces_uploaded_file(pool: PgPool) {
    let admin = seed_user(&pool, "admin@sekolah.id", "ADMIN").await;
    let app = TestApp::new(pool);
    let token = app.token_for(&admin);

    let form = MultipartBody::new().text("name", "Bu Rina").png("photo");
    let response = app
        .multipart(Method::POST, "/teacher/create", Some(&token), form)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let uploaded = json["data"]["photo"].as_str().unwrap().to_string();
    assert!(app.upload_path(&uploaded).exists());

    let response = app
        .json(
            Method::PUT,
            &format!("/teacher/{id}"),
            Some(&token),
            json!({ "photo": "https://cdn.example.org/rina.jpg" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.upload_path(&uploaded).exists());

    let response = app
        .json(
            Method::PUT,
            &format!("/teacher/{id}"),
            Some(&token),
            json!({ "photo": "ftp://cdn.example.org/rina.jpg" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
