use axum::{
    extract::{Multipart, Path, Query, State},
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

use crate::deadline::{cutoff, parse_deadline};
use crate::errors::{AppError, Result};
use crate::handlers::upload::read_image;
use crate::middleware::auth::require_role;
use crate::models::scholarship::{
    NewScholarship, Scholarship, ScholarshipResponse, UpdateScholarship,
};
use crate::models::user::{Claims, Role};
use crate::pagination::{paginate, PageQuery};
use crate::services::storage::key_from_location;
use crate::state::AppState;

const PAGE_SIZE: u64 = 12;

fn scholarships(db: &mongodb::Database) -> Collection<Scholarship> {
    db.collection("scholarships")
}

fn responses(list: Vec<Scholarship>) -> Vec<ScholarshipResponse> {
    list.into_iter().map(ScholarshipResponse::from).collect()
}

// GET /api/scholarships
pub async fn get_scholarships(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScholarshipResponse>>> {
    let cursor = scholarships(&state.db)
        .find(doc! {})
        .sort(doc! { "createdAt": -1 })
        .await?;

    let list: Vec<Scholarship> = cursor.try_collect().await?;

    Ok(Json(responses(list)))
}

// GET /api/scholarships/activeScholarships
pub async fn get_active_scholarships(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScholarshipResponse>>> {
    let boundary = mongodb::bson::DateTime::from_chrono(cutoff(Utc::now()));

    let cursor = scholarships(&state.db)
        .find(doc! { "deadline": { "$gt": boundary } })
        .sort(doc! { "createdAt": -1 })
        .await?;

    let list: Vec<Scholarship> = cursor.try_collect().await?;

    Ok(Json(responses(list)))
}

// GET /api/scholarships/category/:id
pub async fn get_scholarships_by_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>> {
    let category_id = ObjectId::parse_str(&id)?;
    let boundary = mongodb::bson::DateTime::from_chrono(cutoff(Utc::now()));
    let collection = scholarships(&state.db);

    let total = collection.count_documents(doc! {}).await?;
    let page = paginate(total, PAGE_SIZE, query.page_no);

    let mut find = collection
        .find(doc! { "category": category_id, "deadline": { "$gt": boundary } })
        .sort(doc! { "createdAt": -1 });
    if let Some(limit) = page.limit {
        find = find.skip(page.skip).limit(limit);
    }

    let list: Vec<Scholarship> = find.await?.try_collect().await?;

    Ok(Json(json!({
        "totalCatPages": page.total_pages,
        "scholarships": responses(list),
    })))
}

// GET /api/scholarships/sub-category/:id
pub async fn get_scholarships_by_sub_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>> {
    let boundary = mongodb::bson::DateTime::from_chrono(cutoff(Utc::now()));
    let collection = scholarships(&state.db);

    let total = collection.count_documents(doc! {}).await?;
    let page = paginate(total, PAGE_SIZE, query.page_no);

    let mut find = collection
        .find(doc! { "sub_category": &id, "deadline": { "$gt": boundary } })
        .sort(doc! { "createdAt": -1 });
    if let Some(limit) = page.limit {
        find = find.skip(page.skip).limit(limit);
    }

    let list: Vec<Scholarship> = find.await?.try_collect().await?;

    Ok(Json(json!({
        "totalSubCatPages": page.total_pages,
        "scholarships": responses(list),
    })))
}

// GET /api/scholarships/archives
pub async fn get_scholarship_archives(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>> {
    // Archived is the exact complement of active: deadline <= cutoff.
    let boundary = mongodb::bson::DateTime::from_chrono(cutoff(Utc::now()));
    let collection = scholarships(&state.db);

    let total = collection.count_documents(doc! {}).await?;
    let page = paginate(total, PAGE_SIZE, query.page_no);

    let mut find = collection
        .find(doc! { "deadline": { "$lte": boundary } })
        .sort(doc! { "createdAt": -1 });
    if let Some(limit) = page.limit {
        find = find.skip(page.skip).limit(limit);
    }

    let list: Vec<Scholarship> = find.await?.try_collect().await?;

    Ok(Json(json!({
        "totalArchivesPages": page.total_pages,
        "archivedScholarships": responses(list),
    })))
}

// POST /api/scholarships
pub async fn create_scholarship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<ScholarshipResponse>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let mut fields = NewScholarship::default();
    let mut brand_image = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => fields.title = field.text().await?,
            "brand" => fields.brand = field.text().await?,
            "deadline" => fields.deadline = field.text().await?,
            "markdown" => fields.markdown = field.text().await?,
            "category" => fields.category = field.text().await?,
            "sub_category" => fields.sub_category = field.text().await?,
            "brand_image" => brand_image = Some(read_image(field).await?),
            _ => {}
        }
    }

    fields.validate()?;

    let deadline = parse_deadline(&fields.deadline).ok_or_else(|| {
        AppError::Validation("deadline must be an RFC 3339 timestamp or a YYYY-MM-DD date".into())
    })?;
    let category = ObjectId::parse_str(&fields.category)?;
    let creator = ObjectId::parse_str(&claims.sub).ok();

    let image = brand_image.ok_or(AppError::NoImageProvided)?;
    let location = state
        .storage
        .upload(
            &state.config.scholarships_bucket,
            &image.key,
            &image.content_type,
            image.data,
        )
        .await?;

    let scholarship = Scholarship::new(fields, location, deadline, category, creator);
    if scholarship.slug.is_empty() {
        return Err(AppError::Validation(
            "title must contain at least one letter or digit".into(),
        ));
    }

    scholarships(&state.db).insert_one(&scholarship).await?;

    Ok(Json(scholarship.into()))
}

// PUT /api/scholarships/:id
pub async fn update_scholarship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateScholarship>,
) -> Result<Json<ScholarshipResponse>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;

    // The slug is fixed at creation; editing the title does not re-derive it.
    let mut set = Document::new();
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(brand) = payload.brand {
        set.insert("brand", brand);
    }
    if let Some(markdown) = payload.markdown {
        set.insert("markdown", markdown);
    }
    if let Some(deadline) = payload.deadline {
        set.insert("deadline", mongodb::bson::DateTime::from_chrono(deadline));
    }
    if let Some(category) = payload.category {
        set.insert("category", ObjectId::parse_str(&category)?);
    }
    if let Some(sub_category) = payload.sub_category {
        set.insert("sub_category", sub_category);
    }

    if set.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }
    set.insert("updatedAt", mongodb::bson::DateTime::now());

    let updated = scholarships(&state.db)
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::NotFound("Scholarship"))?;

    Ok(Json(updated.into()))
}

// DELETE /api/scholarships/:id
pub async fn delete_scholarship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    require_role(&claims, &[Role::Creator, Role::Admin])?;

    let object_id = ObjectId::parse_str(&id)?;
    let collection = scholarships(&state.db);

    let scholarship = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::NotFound("Scholarship"))?;

    if let Some(key) = scholarship
        .brand_image
        .as_deref()
        .and_then(key_from_location)
    {
        if let Err(e) = state
            .storage
            .delete(&state.config.scholarships_bucket, key)
            .await
        {
            tracing::warn!(
                "failed to delete '{}' from the scholarships bucket: {}",
                key,
                e
            );
        }
    }

    collection.delete_one(doc! { "_id": object_id }).await?;

    Ok(Json(json!({ "success": true, "msg": "deleted!" })))
}
