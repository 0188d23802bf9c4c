// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub items_bucket: String,
    pub jobs_bucket: String,
    pub scholarships_bucket: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        AppConfig {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "okaziyo".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            items_bucket: env::var("S3_BUCKET_ITEMS").expect("S3_BUCKET_ITEMS must be set"),
            jobs_bucket: env::var("S3_BUCKET_JOBS").expect("S3_BUCKET_JOBS must be set"),
            scholarships_bucket: env::var("S3_BUCKET_SCHOLARSHIPS")
                .expect("S3_BUCKET_SCHOLARSHIPS must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a number"),
        }
    }
}
