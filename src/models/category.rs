use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub title: String,
    pub description: String,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,

    #[serde(default)]
    pub sub_category: Vec<SubCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategory {
    pub name: String,
    pub description: String,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<ObjectId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubCategoryInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sub_category: Option<Vec<SubCategoryInput>>,
}

#[derive(Debug, Serialize)]
pub struct SubCategoryResponse {
    pub name: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
    pub creator: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
    pub sub_category: Vec<SubCategoryResponse>,
    pub creator: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category._id.map(|id| id.to_hex()).unwrap_or_default(),
            title: category.title,
            description: category.description,
            date_created: category.date_created,
            sub_category: category
                .sub_category
                .into_iter()
                .map(|sub| SubCategoryResponse {
                    name: sub.name,
                    description: sub.description,
                    date_created: sub.date_created,
                    creator: sub.creator.map(|id| id.to_hex()),
                })
                .collect(),
            creator: category.creator.map(|id| id.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_description() {
        let payload = CreateCategory {
            title: String::new(),
            description: "Anything on wheels".to_string(),
        };
        assert!(payload.validate().is_err());

        let payload = CreateCategory {
            title: "Vehicles".to_string(),
            description: String::new(),
        };
        assert!(payload.validate().is_err());

        let payload = CreateCategory {
            title: "Vehicles".to_string(),
            description: "Anything on wheels".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
