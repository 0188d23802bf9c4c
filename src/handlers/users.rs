use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::middleware::auth::require_role;
use crate::models::user::{Claims, Role, UpdateUser, User, UserResponse};
use crate::state::AppState;

fn users(db: &mongodb::Database) -> Collection<User> {
    db.collection("users")
}

// GET /api/users
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let cursor = users(&state.db)
        .find(doc! {})
        .sort(doc! { "date_registered": -1 })
        .await?;

    let list: Vec<User> = cursor.try_collect().await?;

    Ok(Json(list.into_iter().map(UserResponse::from).collect()))
}

// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    require_role(&claims, &[Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let user = users(&state.db)
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(user.into()))
}

// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<UserResponse>> {
    require_role(&claims, &[Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;

    let mut set = Document::new();
    if let Some(name) = payload.name {
        set.insert("name", name);
    }
    if let Some(email) = payload.email {
        set.insert("email", email);
    }
    if let Some(role) = payload.role {
        set.insert("role", mongodb::bson::to_bson(&role)?);
    }

    if set.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }

    let updated = users(&state.db)
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(updated.into()))
}

// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    require_role(&claims, &[Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let result = users(&state.db)
        .delete_one(doc! { "_id": object_id })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("User"));
    }

    Ok(Json(json!({ "msg": "Deleted successfully!" })))
}
