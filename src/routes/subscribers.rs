use axum::{
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};

use crate::handlers::subscribers;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new().route("/", post(subscribers::create_subscriber));

    let protected = Router::new()
        .route("/", get(subscribers::get_subscribers))
        .route("/:id", delete(subscribers::delete_subscriber))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
