use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::categories;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new().route("/", get(categories::get_categories));

    let protected = Router::new()
        .route("/:id", get(categories::get_category))
        .route("/", post(categories::create_category))
        .route("/:id", put(categories::update_category))
        .route("/:id", delete(categories::delete_category))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
