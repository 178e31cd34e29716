#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use schoolcms_api::auth::jwt::{generate_access_token, JwtConfig, TokenSubject};
use schoolcms_api::auth::password::hash_password;
use schoolcms_api::config::ServerConfig;
use schoolcms_api::router::build_app_router;
use schoolcms_api::state::AppState;
use schoolcms_db::models::user::{CreateUser, User};
use schoolcms_db::repositories::UserRepo;

pub const BASE_URL: &str = "http://localhost:9000";
pub const PASSWORD: &str = "rahasia123";
const BOUNDARY: &str = "schoolcms-test-boundary";

/// Build a test `ServerConfig` writing uploads under `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 8 * 1024 * 1024,
        upload_dir: upload_dir.to_path_buf(),
        base_url: BASE_URL.to_string(),
        idempotency_ttl_secs: 60,
        idempotency_capacity: 100,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A router with the production middleware stack plus the temp upload dir
/// it writes to. Keep the `TempDir` alive for the duration of the test.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        let uploads = tempfile::tempdir().expect("tempdir");
        let config = test_config(uploads.path());
        let state = AppState::new(pool, config.clone());
        let router = build_app_router(state, &config);
        Self {
            router,
            config,
            uploads,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.expect("request failed")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request(Method::GET, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request(Method::DELETE, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Response {
        let req = request(method, uri, token)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        form: MultipartBody,
    ) -> Response {
        self.send(form.into_request(request(method, uri, token))).await
    }

    /// Sign a token for `user` with the app's JWT secret.
    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(
            TokenSubject {
                id: user.id,
                name: &user.name,
                email: &user.email,
                role: &user.role,
            },
            &self.config.jwt,
        )
        .expect("token")
    }

    /// On-disk path of an upload reference returned by the API.
    pub fn upload_path(&self, reference: &str) -> PathBuf {
        let relative = reference
            .strip_prefix(&format!("{BASE_URL}/public/"))
            .expect("reference should point at the public upload prefix");
        self.uploads.path().join(relative)
    }
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a user directly and return it.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        name: format!("{role} {email}"),
        email: email.to_string(),
        password_hash: hash_password(PASSWORD).expect("hash"),
        role: role.to_string(),
        profile_picture: None,
    };
    UserRepo::create(pool, &input).await.expect("seed user")
}

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Attach a small fake PNG.
    pub fn png(self, name: &str) -> Self {
        self.file(name, "foto.png", "image/png", b"\x89PNG\r\n\x1a\nfake")
    }

    fn into_request(mut self, builder: axum::http::request::Builder) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        builder
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}
