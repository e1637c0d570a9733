use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use kernel::{
    model::auth::{AccessToken, Principal, Role},
    repository::auth::AccessVerifier,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Verifies HS256-signed tokens issued for staff members.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl AccessVerifier for JwtVerifier {
    async fn verify(&self, token: &AccessToken) -> AppResult<Principal> {
        let data = decode::<Claims>(&token.0, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error.message = %e, "rejected bearer token");
            AppError::UnauthenticatedError("invalid access token".into())
        })?;
        let role = data.claims.role.parse::<Role>().map_err(|_| {
            AppError::UnauthenticatedError(format!("unknown role: {}", data.claims.role))
        })?;
        Ok(Principal {
            subject: data.claims.sub,
            role,
        })
    }
}
