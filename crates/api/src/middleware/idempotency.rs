//! `Idempotency-Key` extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use schoolcms_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Request header carrying the client-chosen deduplication key.
pub const IDEMPOTENCY_HEADER: &str = "idempotency-key";

/// Claims the request's `Idempotency-Key` in the shared cache.
///
/// Requests without the header pass through with `None`. A key already
/// claimed within the cache TTL is rejected with 409 before the handler runs.
#[derive(Debug, Clone)]
pub struct IdempotencyGuard(pub Option<String>);

impl FromRequestParts<AppState> for IdempotencyGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(IDEMPOTENCY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|k| !k.is_empty());

        let Some(key) = key else {
            return Ok(IdempotencyGuard(None));
        };

        if !state.idempotency.try_claim(key) {
            tracing::info!(idempotency_key = %key, "Duplicate request rejected");
            return Err(AppError::Core(CoreError::Conflict(
                "Request already processed".into(),
            )));
        }

        Ok(IdempotencyGuard(Some(key.to_string())))
    }
}
