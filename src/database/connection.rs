use mongodb::bson::Document;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::config::AppConfig;
use crate::models::category::Category;
use crate::models::job::Job;
use crate::models::multijob::Multijob;
use crate::models::scholarship::Scholarship;
use crate::models::subscriber::Subscriber;
use crate::models::user::User;

pub async fn get_db_client(config: &AppConfig) -> Database {
    let client = Client::with_uri_str(&config.database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&config.database_name);

    // Verify the database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("✅ Connected to database: {}", config.database_name);
            tracing::info!("📂 Collections found: {:?}", collections);
        }
        Err(e) => {
            tracing::error!(
                "❌ Database '{}' may not exist or is inaccessible: {}",
                config.database_name,
                e
            );
        }
    }

    db
}

/// Uniqueness lives in the database: category titles, posting slugs and the
/// email-like identifiers are all backed by unique indexes, and a violated
/// index surfaces as a duplicate-key write error.
pub async fn ensure_unique_indexes(db: &Database) -> mongodb::error::Result<()> {
    unique_index::<Category>(db, "categories", "title").await?;
    unique_index::<Job>(db, "jobs", "slug").await?;
    unique_index::<Scholarship>(db, "scholarships", "slug").await?;
    unique_index::<Multijob>(db, "multijobs", "slug").await?;
    unique_index::<User>(db, "users", "email").await?;
    unique_index::<Subscriber>(db, "subscribers", "email").await?;
    Ok(())
}

async fn unique_index<T: Send + Sync>(
    db: &Database,
    collection: &str,
    field: &str,
) -> mongodb::error::Result<()> {
    let mut keys = Document::new();
    keys.insert(field, 1);

    let index = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build();

    db.collection::<T>(collection).create_index(index).await?;
    tracing::info!("🔑 Unique index on {}.{}", collection, field);
    Ok(())
}
