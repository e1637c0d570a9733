use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidStatusTransition(String),
    #[error("{0}")]
    UnauthenticatedError(String),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    ConversionEntityError(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    kind: &'a str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError(_) => StatusCode::UNAUTHORIZED,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidStatusTransition(_) => StatusCode::CONFLICT,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // 機械判定用の分類。レスポンスの kind フィールドに入る
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) | AppError::ValidationError(_) => "validation",
            AppError::UnauthenticatedError(_) => "unauthenticated",
            AppError::EntityNotFound(_) => "not_found",
            AppError::Conflict(_) | AppError::InvalidStatusTransition(_) => "conflict",
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::ConversionEntityError(_) => "persistence",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // サーバー側の問題は詳細をログにだけ残し、クライアントには汎用メッセージを返す
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "failed to process the request".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: message,
            kind: self.kind(),
        };
        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
