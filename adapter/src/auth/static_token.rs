use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use kernel::{
    model::auth::{AccessToken, Principal, Role},
    repository::auth::AccessVerifier,
};
use shared::error::{AppError, AppResult};

/// Accepts exactly one pre-shared token and maps it to the administrator.
pub struct StaticTokenVerifier {
    token: String,
}

impl StaticTokenVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &AccessToken) -> AppResult<Principal> {
        if !self.token.is_empty() && constant_time_eq(self.token.as_bytes(), token.0.as_bytes()) {
            Ok(Principal {
                subject: "admin".into(),
                role: Role::Admin,
            })
        } else {
            Err(AppError::UnauthenticatedError("invalid access token".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_the_configured_token_passes() {
        let verifier = StaticTokenVerifier::new("s3cret");

        let principal = verifier.verify(&AccessToken("s3cret".into())).await.unwrap();
        assert_eq!(principal.role, Role::Admin);

        for bad in ["", "s3cre", "s3cret ", "S3CRET"] {
            let err = verifier.verify(&AccessToken(bad.into())).await.unwrap_err();
            assert!(matches!(err, AppError::UnauthenticatedError(_)), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn empty_configured_token_rejects_everything() {
        let verifier = StaticTokenVerifier::new("");
        assert!(verifier.verify(&AccessToken(String::new())).await.is_err());
    }
}
