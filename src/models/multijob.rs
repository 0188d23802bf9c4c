use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::slug::slugify;

/// A digest post bundling several openings under one title, no deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Multijob {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub title: String,
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<ObjectId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMultijob {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "markdown is required"))]
    pub markdown: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMultijob {
    pub title: Option<String>,
    pub markdown: Option<String>,
}

impl Multijob {
    /// Slug from the title alone; there is no brand on a digest post.
    pub fn new(fields: CreateMultijob, creator: Option<ObjectId>) -> Self {
        let now = Utc::now();
        let slug = slugify(&fields.title, None);

        Multijob {
            _id: Some(ObjectId::new()),
            title: fields.title,
            markdown: fields.markdown,
            created_at: now,
            updated_at: now,
            slug,
            creator,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MultijobResponse {
    pub id: String,
    pub title: String,
    pub markdown: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub slug: String,
    pub creator: Option<String>,
}

impl From<Multijob> for MultijobResponse {
    fn from(multijob: Multijob) -> Self {
        MultijobResponse {
            id: multijob._id.map(|id| id.to_hex()).unwrap_or_default(),
            title: multijob.title,
            markdown: multijob.markdown,
            created_at: multijob.created_at,
            updated_at: multijob.updated_at,
            slug: multijob.slug,
            creator: multijob.creator.map(|id| id.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_uses_title_only() {
        let multijob = Multijob::new(
            CreateMultijob {
                title: "July Openings: Nairobi & Mombasa".to_string(),
                markdown: "...".to_string(),
            },
            None,
        );
        assert_eq!(multijob.slug, "july-openings-nairobi-mombasa");
    }
}
