use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use garde::Validate;
use kernel::model::auth::{AccessToken, Principal};
use registry::AppRegistry;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult};

// 静的な管理トークンでのみ通過できるユーザー
pub struct AdminUser(pub Principal);

// 管理トークンまたはスタッフ用の署名付きトークンで通過できるユーザー
pub struct StaffUser(pub Principal);

#[async_trait]
impl FromRequestParts<AppRegistry> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        registry.admin_verifier().verify(&token).await.map(Self)
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        registry.staff_verifier().verify(&token).await.map(Self)
    }
}

fn bearer_token(parts: &Parts) -> AppResult<AccessToken> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::UnauthenticatedError("missing authorization header".into()))?
        .to_str()
        .map_err(|_| AppError::UnauthenticatedError("malformed authorization header".into()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| AccessToken(t.to_string()))
        .ok_or_else(|| AppError::UnauthenticatedError("expected a bearer token".into()))
}

/// JSON body that has been deserialized and validated with garde.
///
/// Deserialization failures (missing fields, wrong types, malformed JSON) are
/// reported as `AppError::InvalidRequest` so that every 400 shares one shape.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate<Context = ()>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::InvalidRequest(rejection.body_text()))?;
        value.validate(&())?;
        Ok(Self(value))
    }
}

/// Query string extractor whose rejections use the same JSON error shape.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{contact::CreateContactRequest, hall::AvailabilityQuery};
    use axum::{
        body::Body,
        http::{self, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt;

    async fn echo(ValidatedJson(req): ValidatedJson<CreateContactRequest>) -> impl IntoResponse {
        req.subject
    }

    async fn post_json(body: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(echo));
        let res = app
            .oneshot(
                http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let (status, body) =
            post_json(r#"{"name":"Ken","email":"ken@example.com","subject":"Hi"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");
        assert!(body["error"].as_str().unwrap().contains("message"));
    }

    #[tokio::test]
    async fn garde_rules_are_applied() {
        let (status, body) = post_json(
            r#"{"name":"","email":"ken@example.com","subject":"Hi","message":"Hello"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let (status, _) = post_json("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let res = Router::new()
            .route("/", post(echo))
            .oneshot(
                http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"name":"Ken","email":"ken@example.com","subject":"Hi","message":"Hello"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    async fn availability(QueryParams(q): QueryParams<AvailabilityQuery>) -> impl IntoResponse {
        format!("{} {}", q.date, q.start_time)
    }

    async fn get_query(uri: &str) -> (StatusCode, serde_json::Value) {
        let res = Router::new()
            .route("/", get(availability))
            .oneshot(http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn missing_query_param_is_a_validation_error() {
        let (status, body) = get_query("/?date=2026-10-17").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");
        assert!(body["error"].as_str().unwrap().contains("startTime"));
    }

    #[tokio::test]
    async fn complete_query_passes_through() {
        let (status, _) = get_query("/?date=2026-10-17&startTime=19:00").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn bearer_token_parsing() {
        let (mut parts, _) = http::Request::builder()
            .header(AUTHORIZATION, "Bearer abc123")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts).unwrap().0, "abc123");

        parts
            .headers
            .insert(AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert!(matches!(
            bearer_token(&parts),
            Err(AppError::UnauthenticatedError(_))
        ));

        parts.headers.remove(AUTHORIZATION);
        assert!(bearer_token(&parts).is_err());
    }
}
