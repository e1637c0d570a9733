use crate::model::auth::{AccessToken, Principal};
use async_trait::async_trait;
use shared::error::AppResult;

// 静的トークン、署名付きトークンなど検証方式ごとに実装を差し替える
#[async_trait]
pub trait AccessVerifier: Send + Sync {
    async fn verify(&self, token: &AccessToken) -> AppResult<Principal>;
}
