use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub mod booking;
pub mod contact;
pub mod hall;
pub mod health;

// 形式の不正な ID に一致するレコードはないので、存在しない ID と同じ 404 を返す
pub(crate) fn path_id<T: FromStr>(raw: &str, entity: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::EntityNotFound(format!("{entity} {raw} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use kernel::model::id::{BookingId, ContactId};

    #[test]
    fn malformed_path_id_is_not_found() {
        let err = path_id::<BookingId>("not-a-uuid", "Booking").unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        assert_eq!(err.to_string(), "Booking not-a-uuid not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        assert!(matches!(
            path_id::<ContactId>("12345", "Contact"),
            Err(AppError::EntityNotFound(_))
        ));
    }

    #[test]
    fn well_formed_path_id_parses() {
        let id = BookingId::new();
        assert_eq!(path_id::<BookingId>(&id.to_string(), "Booking").unwrap(), id);
    }
}
