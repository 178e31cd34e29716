//! Path and query extractors that reject with the failure envelope.
//!
//! axum's own `Path` and `Query` answer malformed input with plain text;
//! these wrappers route the rejection through [`AppError`] so clients always
//! get `{ "status": false, "message": ..., "code": ... }` with a 400.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::FromRequestParts;

use crate::error::AppError;

/// Typed path parameters, e.g. `Path(id): Path<DbId>`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Typed query string, e.g. `Query(params): Query<SearchParams>`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
