use async_trait::async_trait;
use kernel::{
    model::auth::{AccessToken, Principal},
    repository::auth::AccessVerifier,
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// Tries each strategy in order; the first one that accepts the token wins.
pub struct ChainVerifier {
    verifiers: Vec<Arc<dyn AccessVerifier>>,
}

impl ChainVerifier {
    pub fn new(verifiers: Vec<Arc<dyn AccessVerifier>>) -> Self {
        Self { verifiers }
    }
}

#[async_trait]
impl AccessVerifier for ChainVerifier {
    async fn verify(&self, token: &AccessToken) -> AppResult<Principal> {
        for verifier in &self.verifiers {
            if let Ok(principal) = verifier.verify(token).await {
                return Ok(principal);
            }
        }
        Err(AppError::UnauthenticatedError("invalid access token".into()))
    }
}
