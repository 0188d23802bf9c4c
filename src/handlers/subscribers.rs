use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::middleware::auth::require_role;
use crate::models::subscriber::{CreateSubscriber, Subscriber, SubscriberResponse};
use crate::models::user::{Claims, Role};
use crate::state::AppState;

fn subscribers(db: &mongodb::Database) -> Collection<Subscriber> {
    db.collection("subscribers")
}

// POST /api/subscribers
pub async fn create_subscriber(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubscriber>,
) -> Result<Json<SubscriberResponse>> {
    payload.validate()?;

    let collection = subscribers(&state.db);

    if collection
        .find_one(doc! { "email": &payload.email })
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateKey);
    }

    let subscriber = Subscriber {
        _id: Some(ObjectId::new()),
        name: payload.name,
        email: payload.email,
        date_subscribed: Utc::now(),
    };

    collection.insert_one(&subscriber).await?;

    Ok(Json(subscriber.into()))
}

// GET /api/subscribers
pub async fn get_subscribers(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<SubscriberResponse>>> {
    require_role(&claims, &[Role::Admin])?;

    let cursor = subscribers(&state.db)
        .find(doc! {})
        .sort(doc! { "date_subscribed": -1 })
        .await?;

    let list: Vec<Subscriber> = cursor.try_collect().await?;

    Ok(Json(list.into_iter().map(SubscriberResponse::from).collect()))
}

// DELETE /api/subscribers/:id
pub async fn delete_subscriber(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    require_role(&claims, &[Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let result = subscribers(&state.db)
        .delete_one(doc! { "_id": object_id })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Subscriber"));
    }

    Ok(Json(json!({ "msg": "Deleted successfully!" })))
}
