use axum::{
    middleware::from_fn,
    routing::{delete, get, put},
    Router,
};

use crate::handlers::users;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new().route("/", get(users::get_users));

    let protected = Router::new()
        .route("/:id", get(users::get_user))
        .route("/:id", put(users::update_user))
        .route("/:id", delete(users::delete_user))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
