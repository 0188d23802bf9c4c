use axum::{
    extract::{Multipart, Path, Query, State},
    response::Json,
    Extension,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::handlers::upload::{read_image, ImageUpload};
use crate::middleware::auth::require_role;
use crate::models::item::{Item, ItemResponse, NewItem, UpdateItem};
use crate::models::user::{Claims, Role};
use crate::pagination::{paginate, PageQuery};
use crate::services::storage::key_from_location;
use crate::state::AppState;

/// 18 on the primary listing, 12 on category and sub-category pages.
const LISTING_PAGE_SIZE: u64 = 18;
const CATEGORY_PAGE_SIZE: u64 = 12;
const MAX_PICTURES: usize = 12;

fn items(db: &mongodb::Database) -> Collection<Item> {
    db.collection("items")
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// GET /api/items
pub async fn get_items(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ItemResponse>>> {
    let collection = items(&state.db);

    let mut find = collection.find(doc! {}).sort(doc! { "date_created": -1 });
    if let Some(limit) = query.limit {
        find = find.limit(limit);
    }

    let list: Vec<Item> = find.await?.try_collect().await?;

    Ok(Json(list.into_iter().map(ItemResponse::from).collect()))
}

// GET /api/items/pagination
pub async fn get_items_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>> {
    let collection = items(&state.db);

    let total = collection.count_documents(doc! {}).await?;
    let page = paginate(total, LISTING_PAGE_SIZE, query.page_no);

    let mut find = collection.find(doc! {}).sort(doc! { "date_created": -1 });
    if let Some(limit) = page.limit {
        find = find.skip(page.skip).limit(limit);
    }

    let list: Vec<Item> = find.await?.try_collect().await?;
    let responses: Vec<ItemResponse> = list.into_iter().map(ItemResponse::from).collect();

    Ok(Json(json!({
        "totalPages": page.total_pages,
        "items": responses,
    })))
}

// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>> {
    let object_id = ObjectId::parse_str(&id)?;
    let item = items(&state.db)
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    Ok(Json(item.into()))
}

// GET /api/items/category/:id
pub async fn get_items_by_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>> {
    let category_id = ObjectId::parse_str(&id)?;
    let collection = items(&state.db);

    let total = collection.count_documents(doc! {}).await?;
    let page = paginate(total, CATEGORY_PAGE_SIZE, query.page_no);

    let mut find = collection
        .find(doc! { "category": category_id })
        .sort(doc! { "date_created": -1 });
    if let Some(limit) = page.limit {
        find = find.skip(page.skip).limit(limit);
    }

    let list: Vec<Item> = find.await?.try_collect().await?;
    let responses: Vec<ItemResponse> = list.into_iter().map(ItemResponse::from).collect();

    Ok(Json(json!({
        "totalCatPages": page.total_pages,
        "items": responses,
    })))
}

// GET /api/items/sub-category/:id
pub async fn get_items_by_sub_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>> {
    let collection = items(&state.db);

    let total = collection.count_documents(doc! {}).await?;
    let page = paginate(total, CATEGORY_PAGE_SIZE, query.page_no);

    let mut find = collection
        .find(doc! { "sub_category": &id })
        .sort(doc! { "date_created": -1 });
    if let Some(limit) = page.limit {
        find = find.skip(page.skip).limit(limit);
    }

    let list: Vec<Item> = find.await?.try_collect().await?;
    let responses: Vec<ItemResponse> = list.into_iter().map(ItemResponse::from).collect();

    Ok(Json(json!({
        "totalSubCatPages": page.total_pages,
        "items": responses,
    })))
}

// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<ItemResponse>> {
    let mut fields = NewItem::default();
    let mut pictures: Vec<ImageUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => fields.title = field.text().await?,
            "description" => fields.description = field.text().await?,
            "brand" => fields.brand = field.text().await?,
            "price" => fields.price = field.text().await?,
            "category" => fields.category = field.text().await?,
            "sub_category" => fields.sub_category = field.text().await?,
            "contactNumber" => fields.contact_number = field.text().await?,
            "pictures" => {
                if pictures.len() >= MAX_PICTURES {
                    return Err(AppError::Validation(format!(
                        "at most {} pictures per item",
                        MAX_PICTURES
                    )));
                }
                pictures.push(read_image(field).await?);
            }
            _ => {}
        }
    }

    fields.validate()?;
    let category = ObjectId::parse_str(&fields.category)?;
    let creator = ObjectId::parse_str(&claims.sub).ok();

    let mut locations = Vec::with_capacity(pictures.len());
    for image in pictures {
        let location = state
            .storage
            .upload(
                &state.config.items_bucket,
                &image.key,
                &image.content_type,
                image.data,
            )
            .await?;
        locations.push(location);
    }

    let item = Item::new(fields, category, locations, creator);
    items(&state.db).insert_one(&item).await?;

    Ok(Json(item.into()))
}

// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItem>,
) -> Result<Json<ItemResponse>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;

    let mut set = Document::new();
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(description) = payload.description {
        set.insert("description", description);
    }
    if let Some(brand) = payload.brand {
        set.insert("brand", brand);
    }
    if let Some(price) = payload.price {
        set.insert("price", price);
    }
    if let Some(category) = payload.category {
        set.insert("category", ObjectId::parse_str(&category)?);
    }
    if let Some(sub_category) = payload.sub_category {
        set.insert("sub_category", sub_category);
    }
    if let Some(contact_number) = payload.contact_number {
        set.insert("contactNumber", contact_number);
    }

    if set.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }

    let updated = items(&state.db)
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    Ok(Json(updated.into()))
}

// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let collection = items(&state.db);

    let item = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    // Best-effort bucket cleanup; a missing object must not wedge the delete.
    for location in &item.pictures {
        if let Some(key) = key_from_location(location) {
            if let Err(e) = state.storage.delete(&state.config.items_bucket, key).await {
                tracing::warn!("failed to delete '{}' from the items bucket: {}", key, e);
            }
        }
    }

    collection.delete_one(doc! { "_id": object_id }).await?;

    Ok(Json(json!({ "success": true, "msg": "deleted!" })))
}
