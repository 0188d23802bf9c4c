use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Creator,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Creator => write!(f, "Creator"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never exposed through a response type
    pub password: String,
    pub role: Role,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_registered: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub date_registered: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user._id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            role: user.role,
            date_registered: user.date_registered,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_valid_email() {
        let payload = RegisterUser {
            name: "Jo".to_string(),
            email: "not-an-email".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_rejects_short_password() {
        let payload = RegisterUser {
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: "abc".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_accepts_well_formed_payload() {
        let payload = RegisterUser {
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
