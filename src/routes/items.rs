use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::items;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(items::get_items))
        .route("/pagination", get(items::get_items_page))
        .route("/category/:id", get(items::get_items_by_category))
        .route("/sub-category/:id", get(items::get_items_by_sub_category))
        .route("/:id", get(items::get_item));

    let protected = Router::new()
        .route("/", post(items::create_item))
        .route("/:id", put(items::update_item))
        .route("/:id", delete(items::delete_item))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
