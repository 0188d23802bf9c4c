use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::jobs;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(jobs::get_jobs))
        .route("/activeJobs", get(jobs::get_active_jobs))
        .route("/category/:id", get(jobs::get_jobs_by_category))
        .route("/sub-category/:id", get(jobs::get_jobs_by_sub_category))
        .route("/archives", get(jobs::get_job_archives));

    let protected = Router::new()
        .route("/", post(jobs::create_job))
        .route("/:id", put(jobs::update_job))
        .route("/:id", delete(jobs::delete_job))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
