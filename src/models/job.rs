use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::slug::slugify;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub title: String,
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

/// Text fields collected from the multipart create request.
#[derive(Debug, Default, Validate)]
pub struct NewJob {
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
pub struct UpdateJob {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub markdown: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
}

impl Job {
    /// The slug is derived here, once, from the title and brand. Later title
    /// edits do not re-derive it; the published URL stays stable.
    pub fn new(
        fields: NewJob,
        brand_image: String,
        deadline: DateTime<Utc>,
        category: ObjectId,
        creator: Option<ObjectId>,
    ) -> Self {
        let now = Utc::now();
        let slug = slugify(&fields.title, Some(&fields.brand));

        Job {
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
pub struct JobResponse {
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

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            id: job._id.map(|id| id.to_hex()).unwrap_or_default(),
            title: job.title,
            brand: job.brand,
            brand_image: job.brand_image,
            markdown: job.markdown,
            created_at: job.created_at,
            updated_at: job.updated_at,
            slug: job.slug,
            deadline: job.deadline,
            creator: job.creator.map(|id| id.to_hex()),
            category: job.category.to_hex(),
            sub_category: job.sub_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewJob {
        NewJob {
            title: "Backend Engineer".to_string(),
            brand: "Acme".to_string(),
            deadline: "2030-01-31".to_string(),
            markdown: "# Role\nBuild things.".to_string(),
            category: "60cddc4c181fa53764a17297".to_string(),
            sub_category: "engineering".to_string(),
        }
    }

    #[test]
    fn slug_is_derived_from_title_and_brand_at_construction() {
        let job = Job::new(
            fields(),
            "https://example.com/logo.png".to_string(),
            Utc::now(),
            ObjectId::new(),
            None,
        );
        assert_eq!(job.slug, "backend-engineer-at-acme");
    }

    #[test]
    fn required_fields_are_validated() {
        let mut payload = fields();
        payload.markdown = String::new();
        assert!(payload.validate().is_err());
        assert!(fields().validate().is_ok());
    }
}
