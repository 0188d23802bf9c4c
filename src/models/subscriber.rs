use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub email: String,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_subscribed: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubscriber {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date_subscribed: DateTime<Utc>,
}

impl From<Subscriber> for SubscriberResponse {
    fn from(subscriber: Subscriber) -> Self {
        SubscriberResponse {
            id: subscriber._id.map(|id| id.to_hex()).unwrap_or_default(),
            name: subscriber.name,
            email: subscriber.email,
            date_subscribed: subscriber.date_subscribed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format_is_enforced() {
        let payload = CreateSubscriber {
            name: "Amina".to_string(),
            email: "amina@".to_string(),
        };
        assert!(payload.validate().is_err());

        let payload = CreateSubscriber {
            name: "Amina".to_string(),
            email: "amina@example.com".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
