use axum::{extract::State, response::Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::bson::doc;
use mongodb::Collection;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::user::{AuthResponse, Claims, LoginUser, RegisterUser, Role, User};
use crate::state::AppState;

const TOKEN_LIFETIME_SECONDS: i64 = 86400; // 24 hours

fn users(db: &mongodb::Database) -> Collection<User> {
    db.collection("users")
}

fn issue_token(user: &User, secret: &str) -> Result<String> {
    let claims = Claims {
        sub: user._id.map(|id| id.to_hex()).unwrap_or_default(),
        email: user.email.clone(),
        role: user.role,
        exp: (Utc::now().timestamp() + TOKEN_LIFETIME_SECONDS) as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUser>,
) -> Result<Json<AuthResponse>> {
    payload.validate()?;

    let collection = users(&state.db);

    let existing = collection.find_one(doc! { "email": &payload.email }).await?;
    if existing.is_some() {
        return Err(AppError::DuplicateKey);
    }

    let password_hash =
        hash(&payload.password, DEFAULT_COST).map_err(|e| AppError::Validation(e.to_string()))?;

    let user = User {
        _id: Some(mongodb::bson::oid::ObjectId::new()),
        name: payload.name,
        email: payload.email,
        password: password_hash,
        role: Role::User,
        date_registered: Utc::now(),
    };

    collection.insert_one(&user).await?;

    let token = issue_token(&user, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<AuthResponse>> {
    let collection = users(&state.db);

    let user = collection
        .find_one(doc! { "email": &payload.email })
        .await?
        .ok_or(AppError::Auth)?;

    let valid = verify(&payload.password, &user.password).map_err(|_| AppError::Auth)?;
    if !valid {
        return Err(AppError::Auth);
    }

    let token = issue_token(&user, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}
