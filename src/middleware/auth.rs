use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::errors::{AppError, Result};
use crate::models::user::{Claims, Role};

/// Validates the Bearer token and places the decoded claims in the request
/// extensions for the handler to pick up.
pub async fn require_auth(headers: HeaderMap, mut request: Request, next: Next) -> Result<Response> {
    let token = headers
        .get("authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(AppError::Auth)?;

    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string());
    let decoding_key = DecodingKey::from_secret(secret.as_ref());

    let token_data = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?;

    request.extensions_mut().insert(token_data.claims);

    Ok(next.run(request).await)
}

/// Explicit allow/deny gate called at the top of every role-restricted
/// handler. Denial carries the reason in the response body.
pub fn require_role(claims: &Claims, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "the {} role cannot perform this action",
            claims.role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> Claims {
        Claims {
            sub: "64a17297aabbccddeeff0011".to_string(),
            email: "someone@example.com".to_string(),
            role,
            exp: 0,
        }
    }

    #[test]
    fn allows_listed_roles() {
        assert!(require_role(&claims(Role::Admin), &[Role::Admin]).is_ok());
        assert!(require_role(&claims(Role::Creator), &[Role::Creator, Role::Admin]).is_ok());
    }

    #[test]
    fn denies_unlisted_roles_with_a_reason() {
        let denied = require_role(&claims(Role::User), &[Role::Creator, Role::Admin]);
        match denied {
            Err(AppError::Forbidden(reason)) => assert!(reason.contains("User")),
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}
