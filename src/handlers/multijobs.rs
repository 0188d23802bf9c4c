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
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::middleware::auth::require_role;
use crate::models::multijob::{CreateMultijob, Multijob, MultijobResponse, UpdateMultijob};
use crate::models::user::{Claims, Role};
use crate::state::AppState;

fn multijobs(db: &mongodb::Database) -> Collection<Multijob> {
    db.collection("multijobs")
}

// GET /api/multijobs
pub async fn get_multijobs(State(state): State<AppState>) -> Result<Json<Vec<MultijobResponse>>> {
    let cursor = multijobs(&state.db)
        .find(doc! {})
        .sort(doc! { "createdAt": -1 })
        .await?;

    let list: Vec<Multijob> = cursor.try_collect().await?;

    Ok(Json(list.into_iter().map(MultijobResponse::from).collect()))
}

// GET /api/multijobs/:id
pub async fn get_multijob(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MultijobResponse>> {
    let object_id = ObjectId::parse_str(&id)?;
    let multijob = multijobs(&state.db)
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::NotFound("Multijobs"))?;

    Ok(Json(multijob.into()))
}

// POST /api/multijobs
pub async fn create_multijob(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateMultijob>,
) -> Result<Json<MultijobResponse>> {
    require_role(&claims, &[Role::Admin])?;
    payload.validate()?;

    let creator = ObjectId::parse_str(&claims.sub).ok();
    let multijob = Multijob::new(payload, creator);

    if multijob.slug.is_empty() {
        return Err(AppError::Validation(
            "title must contain at least one letter or digit".into(),
        ));
    }

    multijobs(&state.db).insert_one(&multijob).await?;

    Ok(Json(multijob.into()))
}

// PUT /api/multijobs/:id
pub async fn update_multijob(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMultijob>,
) -> Result<Json<MultijobResponse>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;

    // The slug is fixed at creation; editing the title does not re-derive it.
    let mut set = Document::new();
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(markdown) = payload.markdown {
        set.insert("markdown", markdown);
    }

    if set.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }
    set.insert("updatedAt", mongodb::bson::DateTime::now());

    let updated = multijobs(&state.db)
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::NotFound("Multijobs"))?;

    Ok(Json(updated.into()))
}

// DELETE /api/multijobs/:id
pub async fn delete_multijob(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let result = multijobs(&state.db)
        .delete_one(doc! { "_id": object_id })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Multijobs"));
    }

    Ok(Json(json!({ "success": true, "msg": "deleted!" })))
}
