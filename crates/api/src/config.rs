use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `9000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes (default: 8 MiB).
    pub max_body_bytes: usize,
    /// Root directory that uploaded files are written under.
    pub upload_dir: PathBuf,
    /// Public origin used to build attachment URLs.
    pub base_url: String,
    /// How long an `Idempotency-Key` is remembered, in seconds.
    pub idempotency_ttl_secs: u64,
    /// Maximum number of remembered idempotency keys.
    pub idempotency_capacity: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `9000`                   |
    /// | `CORS_ORIGINS`          | `FRONTEND_URL`, else `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `MAX_BODY_BYTES`        | `8388608`                |
    /// | `UPLOAD_DIR`            | `public`                 |
    /// | `BASE_URL`              | `http://localhost:9000`  |
    /// | `IDEMPOTENCY_TTL_SECS`  | `86400`                  |
    /// | `IDEMPOTENCY_CAPACITY`  | `10000`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "9000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .or_else(|_| std::env::var("FRONTEND_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| (8 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "public".into()),
        );

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".into())
            .trim_end_matches('/')
            .to_string();

        let idempotency_ttl_secs: u64 = std::env::var("IDEMPOTENCY_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("IDEMPOTENCY_TTL_SECS must be a valid u64");

        let idempotency_capacity: usize = std::env::var("IDEMPOTENCY_CAPACITY")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("IDEMPOTENCY_CAPACITY must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            upload_dir,
            base_url,
            idempotency_ttl_secs,
            idempotency_capacity,
            jwt,
        }
    }
}
