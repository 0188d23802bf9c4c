use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::multijobs;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(multijobs::get_multijobs))
        .route("/:id", get(multijobs::get_multijob));

    let protected = Router::new()
        .route("/", post(multijobs::create_multijob))
        .route("/:id", put(multijobs::update_multijob))
        .route("/:id", delete(multijobs::delete_multijob))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
