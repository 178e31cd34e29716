use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Account routes mounted at `/user`.
///
/// ```text
/// POST   /login        -> login (public)
/// POST   /create       -> create (public, Idempotency-Key aware)
/// GET    /             -> list (admin)
/// GET    /profile      -> profile (any token)
/// PUT    /pic/{id}     -> update_picture (owner or admin)
/// GET    /{id}         -> get (admin)
/// PUT    /{id}         -> update (admin)
/// DELETE /{id}         -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list))
        .route("/login", post(user::login))
        .route("/create", post(user::create))
        .route("/profile", get(user::profile))
        .route("/pic/{id}", put(user::update_picture))
        .route("/{id}", get(user::get).put(user::update).delete(user::delete))
}
