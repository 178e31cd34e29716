pub mod content;
pub mod health;
pub mod school_info;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree. Mounted at the root, next to `/health`.
///
/// ```text
/// /news                  content CRUD (mutations: admin)
/// /achievement           content CRUD (mutations: any token)
/// /event                 content CRUD (mutations: any token)
/// /school-activity       content CRUD (mutations: any token)
/// /testimony             content CRUD (mutations: any token)
/// /teacher               content CRUD (reads: staff, mutations: admin)
/// /ppdb                  admission campaigns (mutations: any token)
/// /school-info           enrolment statistics
/// /user                  accounts, login, profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/news", content::news_router())
        .nest("/achievement", content::achievement_router())
        .nest("/event", content::event_router())
        .nest("/school-activity", content::school_activity_router())
        .nest("/testimony", content::testimony_router())
        .nest("/teacher", content::teacher_router())
        .nest("/ppdb", content::ppdb_router())
        .nest("/school-info", school_info::router())
        .nest("/user", user::router())
}
