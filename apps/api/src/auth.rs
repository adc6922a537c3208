//! Bearer-token auth: HS256 JWTs, salted password digests, and the
//! `AuthUser` extractor handlers take to enforce role checks.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{UserRow, ROLE_ADMIN};
use crate::state::AppState;

const TOKEN_LIFETIME_DAYS: i64 = 7;

/// The single platform admin is synthesized, never stored in the database.
pub const ADMIN_USER_ID: Uuid = Uuid::nil();

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

pub fn create_access_token(secret: &str, user_id: Uuid, role: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Decodes and validates a token. Invalid or expired tokens yield `None`.
pub fn decode_token(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Stored form: `base64(salt):base64(sha256(salt || password))`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::rng().fill_bytes(&mut salt);
    let digest = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();
    format!("{}:{}", BASE64.encode(salt), BASE64.encode(digest))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once(':') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (BASE64.decode(salt_b64), BASE64.decode(digest_b64)) else {
        return false;
    };
    let digest = Sha256::new()
        .chain_update(&salt)
        .chain_update(password.as_bytes())
        .finalize();
    digest.as_slice() == expected.as_slice()
}

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub resume: Option<String>,
}

impl AuthUser {
    /// Rejects callers whose role differs from `role` with 403.
    pub fn require_role(&self, role: &str) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    fn static_admin() -> Self {
        AuthUser {
            id: ADMIN_USER_ID,
            name: "Platform Admin".to_string(),
            username: "admin".to_string(),
            email: None,
            role: ROLE_ADMIN.to_string(),
            resume: None,
        }
    }
}

impl From<UserRow> for AuthUser {
    fn from(user: UserRow) -> Self {
        AuthUser {
            id: user.id,
            name: user.name,
            username: user.username,
            email: Some(user.email),
            role: user.role,
            resume: user.resume,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims =
            decode_token(&state.config.jwt_secret, token).ok_or(AppError::Unauthorized)?;
        let user_id: Uuid = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;

        if user_id == ADMIN_USER_ID && claims.role == ROLE_ADMIN {
            return Ok(AuthUser::static_admin());
        }

        let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

        user.map(AuthUser::from).ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_password_roundtrip() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let stored = hash_password("hunter2");
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn test_same_password_different_salts() {
        assert_ne!(hash_password("hunter2"), hash_password("hunter2"));
    }

    #[test]
    fn test_malformed_stored_digest_rejected() {
        assert!(!verify_password("hunter2", "not-a-digest"));
        assert!(!verify_password("hunter2", "!!!:???"));
        assert!(!verify_password("hunter2", ""));
    }

    #[test]
    fn test_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(SECRET, user_id, "recruiter").unwrap();
        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "recruiter");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = create_access_token(SECRET, Uuid::new_v4(), "candidate").unwrap();
        assert!(decode_token("other-secret", &token).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "candidate".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(decode_token(SECRET, &token).is_none());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_token(SECRET, "not.a.jwt").is_none());
    }

    #[test]
    fn test_require_role() {
        let admin = AuthUser::static_admin();
        assert!(admin.require_role(ROLE_ADMIN).is_ok());
        assert!(matches!(
            admin.require_role("recruiter"),
            Err(AppError::Forbidden)
        ));
    }
}
