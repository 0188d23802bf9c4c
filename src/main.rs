use axum::extract::{DefaultBodyLimit, State};
use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

mod config;
mod database;
mod deadline;
mod errors;
mod handlers;
mod middleware;
mod models;
mod pagination;
mod routes;
mod services;
mod slug;
mod state;

use config::AppConfig;
use database::connection::{ensure_unique_indexes, get_db_client};
use services::storage::StorageService;
use state::AppState;

// Enough headroom for an item post carrying its full set of pictures.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();

    let db = get_db_client(&config).await;
    if let Err(e) = ensure_unique_indexes(&db).await {
        tracing::error!("❌ Failed to create unique indexes: {}", e);
    }

    let storage = match StorageService::from_env().await {
        Ok(storage) => {
            tracing::info!("✅ Storage client initialized");
            storage
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize storage client: {}", e);
            panic!("Failed to initialize storage client: {}", e);
        }
    };

    let app_state = AppState::new(db, config.clone(), storage);

    let app = build_router(app_state);
    start_server(app, &config).await;
}

fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/api/health", get(api_health_check))
        .nest("/api/categories", routes::categories::routes())
        .nest("/api/items", routes::items::routes())
        .nest("/api/users", routes::users::routes())
        .nest("/api/auth", routes::auth::routes())
        .nest("/api/subscribers", routes::subscribers::routes())
        .nest("/api/jobs", routes::jobs::routes())
        .nest("/api/scholarships", routes::scholarships::routes())
        .nest("/api/multijobs", routes::multijobs::routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(app_state)
}

async fn start_server(app: Router, config: &AppConfig) {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST and PORT must form a valid socket address");

    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            axum::serve(listener, app).await.unwrap();
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn root_handler() -> &'static str {
    "🚀 Okaziyo Listings API"
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn api_health_check(State(state): State<AppState>) -> Json<Value> {
    use mongodb::bson::doc;

    let db_status = match state.db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(json!({
        "status": "healthy",
        "database": db_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
