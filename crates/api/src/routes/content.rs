//! Routers for the public content resources.
//!
//! Every resource has the same shape:
//!
//! ```text
//! GET    /          -> list (?search=)
//! POST   /create    -> create
//! GET    /{id}      -> get
//! PUT    /{id}      -> update
//! DELETE /{id}      -> delete
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{achievement, event, news, ppdb, school_activity, teacher, testimony};
use crate::state::AppState;

/// Mounted at `/news`.
pub fn news_router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list))
        .route("/create", post(news::create))
        .route("/{id}", get(news::get).put(news::update).delete(news::delete))
}

/// Mounted at `/achievement`.
pub fn achievement_router() -> Router<AppState> {
    Router::new()
        .route("/", get(achievement::list))
        .route("/create", post(achievement::create))
        .route(
            "/{id}",
            get(achievement::get)
                .put(achievement::update)
                .delete(achievement::delete),
        )
}

/// Mounted at `/event`.
pub fn event_router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list))
        .route("/create", post(event::create))
        .route("/{id}", get(event::get).put(event::update).delete(event::delete))
}

/// Mounted at `/school-activity`.
pub fn school_activity_router() -> Router<AppState> {
    Router::new()
        .route("/", get(school_activity::list))
        .route("/create", post(school_activity::create))
        .route(
            "/{id}",
            get(school_activity::get)
                .put(school_activity::update)
                .delete(school_activity::delete),
        )
}

/// Mounted at `/testimony`.
pub fn testimony_router() -> Router<AppState> {
    Router::new()
        .route("/", get(testimony::list))
        .route("/create", post(testimony::create))
        .route(
            "/{id}",
            get(testimony::get)
                .put(testimony::update)
                .delete(testimony::delete),
        )
}

/// Mounted at `/teacher`. Also accepts `POST /` for creation.
pub fn teacher_router() -> Router<AppState> {
    Router::new()
        .route("/", get(teacher::list).post(teacher::create))
        .route("/create", post(teacher::create))
        .route(
            "/{id}",
            get(teacher::get).put(teacher::update).delete(teacher::delete),
        )
}

/// Mounted at `/ppdb`.
pub fn ppdb_router() -> Router<AppState> {
    Router::new()
        .route("/", get(ppdb::list))
        .route("/create", post(ppdb::create))
        .route("/{id}", get(ppdb::get).put(ppdb::update).delete(ppdb::delete))
}
