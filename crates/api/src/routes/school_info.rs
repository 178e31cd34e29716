use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::school_info;
use crate::state::AppState;

/// Enrolment statistics mounted at `/school-info`.
///
/// ```text
/// GET   /            -> overview (?major=)
/// POST  /            -> create
/// POST  /create      -> create
/// GET   /summary     -> summary
/// PATCH /decrease    -> decrease
/// GET   /{id}        -> get
/// PUT   /{id}        -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(school_info::overview).post(school_info::create))
        .route("/create", post(school_info::create))
        .route("/summary", get(school_info::summary))
        .route("/decrease", patch(school_info::decrease))
        .route("/{id}", get(school_info::get).put(school_info::update))
}
