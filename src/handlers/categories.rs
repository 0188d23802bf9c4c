use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::middleware::auth::require_role;
use crate::models::category::{
    Category, CategoryResponse, CreateCategory, SubCategory, UpdateCategory,
};
use crate::models::user::{Claims, Role};
use crate::state::AppState;

fn categories(db: &mongodb::Database) -> Collection<Category> {
    db.collection("categories")
}

// GET /api/categories
pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let cursor = categories(&state.db)
        .find(doc! {})
        .sort(doc! { "date_created": 1 })
        .await?;

    let list: Vec<Category> = cursor.try_collect().await?;

    Ok(Json(list.into_iter().map(CategoryResponse::from).collect()))
}

// GET /api/categories/:id
pub async fn get_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let category = categories(&state.db)
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    Ok(Json(category.into()))
}

// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCategory>,
) -> Result<Json<CategoryResponse>> {
    require_role(&claims, &[Role::Admin])?;
    payload.validate()?;

    let collection = categories(&state.db);

    if collection
        .find_one(doc! { "title": &payload.title })
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateKey);
    }

    let category = Category {
        _id: Some(ObjectId::new()),
        title: payload.title,
        description: payload.description,
        date_created: Utc::now(),
        sub_category: Vec::new(),
        creator: ObjectId::parse_str(&claims.sub).ok(),
    };

    collection.insert_one(&category).await?;

    Ok(Json(category.into()))
}

// PUT /api/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<CategoryResponse>> {
    require_role(&claims, &[Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;

    let mut set = Document::new();
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(description) = payload.description {
        set.insert("description", description);
    }
    if let Some(subs) = payload.sub_category {
        for sub in &subs {
            sub.validate()?;
        }
        let creator = ObjectId::parse_str(&claims.sub).ok();
        let subs: Vec<SubCategory> = subs
            .into_iter()
            .map(|sub| SubCategory {
                name: sub.name,
                description: sub.description,
                date_created: Utc::now(),
                creator,
            })
            .collect();
        set.insert("sub_category", mongodb::bson::to_bson(&subs)?);
    }

    if set.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }

    let updated = categories(&state.db)
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    Ok(Json(updated.into()))
}

// DELETE /api/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    require_role(&claims, &[Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let result = categories(&state.db)
        .delete_one(doc! { "_id": object_id })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Category"));
    }

    Ok(Json(json!({ "success": true, "msg": "Category deleted!" })))
}
