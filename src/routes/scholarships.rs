use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::scholarships;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(scholarships::get_scholarships))
        .route(
            "/activeScholarships",
            get(scholarships::get_active_scholarships),
        )
        .route(
            "/category/:id",
            get(scholarships::get_scholarships_by_category),
        )
        .route(
            "/sub-category/:id",
            get(scholarships::get_scholarships_by_sub_category),
        )
        .route("/archives", get(scholarships::get_scholarship_archives));

    let protected = Router::new()
        .route("/", post(scholarships::create_scholarship))
        .route("/:id", put(scholarships::update_scholarship))
        .route("/:id", delete(scholarships::delete_scholarship))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
