use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::slug::slugify;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub title: String,
    /// the awarding institution
    pub brand: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_image: Option<String>,

    pub markdown: String,

    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,

    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub updated_at: DateTime<Utc>,

    pub slug: String,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub deadline: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<ObjectId>,

    pub category: ObjectId,
    pub sub_category: String,
}

#[derive(Debug, Default, Validate)]
pub struct NewScholarship {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "deadline is required"))]
    pub deadline: String,
    #[validate(length(min = 1, message = "markdown is required"))]
    pub markdown: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "sub_category is required"))]
    pub sub_category: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScholarship {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub markdown: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
}

impl Scholarship {
    /// Slug derived once at construction, same rule as jobs.
    pub fn new(
        fields: NewScholarship,
        brand_image: String,
        deadline: DateTime<Utc>,
        category: ObjectId,
        creator: Option<ObjectId>,
    ) -> Self {
        let now = Utc::now();
        let slug = slugify(&fields.title, Some(&fields.brand));

        Scholarship {
            _id: Some(ObjectId::new()),
            title: fields.title,
            brand: fields.brand,
            brand_image: Some(brand_image),
            markdown: fields.markdown,
            created_at: now,
            updated_at: now,
            slug,
            deadline,
            creator,
            category,
            sub_category: fields.sub_category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScholarshipResponse {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub brand_image: Option<String>,
    pub markdown: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub slug: String,
    pub deadline: DateTime<Utc>,
    pub creator: Option<String>,
    pub category: String,
    pub sub_category: String,
}

impl From<Scholarship> for ScholarshipResponse {
    fn from(scholarship: Scholarship) -> Self {
        ScholarshipResponse {
            id: scholarship._id.map(|id| id.to_hex()).unwrap_or_default(),
            title: scholarship.title,
            brand: scholarship.brand,
            brand_image: scholarship.brand_image,
            markdown: scholarship.markdown,
            created_at: scholarship.created_at,
            updated_at: scholarship.updated_at,
            slug: scholarship.slug,
            deadline: scholarship.deadline,
            creator: scholarship.creator.map(|id| id.to_hex()),
            category: scholarship.category.to_hex(),
            sub_category: scholarship.sub_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_combines_title_and_institution() {
        let scholarship = Scholarship::new(
            NewScholarship {
                title: "PhD Fellowship".to_string(),
                brand: "MIT".to_string(),
                deadline: "2030-05-01".to_string(),
                markdown: "Apply now.".to_string(),
                category: "60cddc0f181fa53764a17295".to_string(),
                sub_category: "postgraduate".to_string(),
            },
            "https://example.com/seal.png".to_string(),
            Utc::now(),
            ObjectId::new(),
            None,
        );
        assert_eq!(scholarship.slug, "phd-fellowship-at-mit");
    }
}
