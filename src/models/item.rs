use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub brand: String,
    /// kept as a free-form string, sellers write things like "1,500 negotiable"
    pub price: String,

    #[serde(default)]
    pub pictures: Vec<String>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,

    pub category: ObjectId,
    pub sub_category: String,

    #[serde(rename = "contactNumber")]
    pub contact_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<ObjectId>,
}

/// Text fields collected from the multipart create request, validated before
/// any upload or insert happens.
#[derive(Debug, Default, Validate)]
pub struct NewItem {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "price is required"))]
    pub price: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "sub_category is required"))]
    pub sub_category: String,
    #[validate(length(min = 10, max = 13, message = "contactNumber must be 10 to 13 digits"))]
    pub contact_number: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: Option<String>,
}

impl Item {
    pub fn new(
        fields: NewItem,
        category: ObjectId,
        pictures: Vec<String>,
        creator: Option<ObjectId>,
    ) -> Self {
        Item {
            _id: Some(ObjectId::new()),
            title: fields.title,
            description: fields.description,
            brand: fields.brand,
            price: fields.price,
            pictures,
            date_created: Utc::now(),
            category,
            sub_category: fields.sub_category,
            contact_number: fields.contact_number,
            creator,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub brand: String,
    pub price: String,
    pub pictures: Vec<String>,
    pub date_created: DateTime<Utc>,
    pub category: String,
    pub sub_category: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    pub creator: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        ItemResponse {
            id: item._id.map(|id| id.to_hex()).unwrap_or_default(),
            title: item.title,
            description: item.description,
            brand: item.brand,
            price: item.price,
            pictures: item.pictures,
            date_created: item.date_created,
            category: item.category.to_hex(),
            sub_category: item.sub_category,
            contact_number: item.contact_number,
            creator: item.creator.map(|id| id.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewItem {
        NewItem {
            title: "Mountain bike".to_string(),
            description: "Hardtail, barely used".to_string(),
            brand: "Trek".to_string(),
            price: "350".to_string(),
            category: "60cddc4c181fa53764a17297".to_string(),
            sub_category: "bikes".to_string(),
            contact_number: "0712345678".to_string(),
        }
    }

    #[test]
    fn contact_number_length_is_enforced() {
        let mut payload = fields();
        payload.contact_number = "12345".to_string();
        assert!(payload.validate().is_err());

        let mut payload = fields();
        payload.contact_number = "07123456789012".to_string();
        assert!(payload.validate().is_err());

        assert!(fields().validate().is_ok());
    }

    #[test]
    fn missing_required_field_fails_validation() {
        let mut payload = fields();
        payload.description = String::new();
        assert!(payload.validate().is_err());
    }
}
