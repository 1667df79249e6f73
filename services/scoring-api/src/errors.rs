use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    DatabaseError(sqlx::Error),
    ValidationError(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::DatabaseError(e) => write!(f, "Database error: {}", e),
            ApiError::ValidationError(msg) => write!(f, "{}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::ValidationError(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "VALIDATION_ERROR",
                    "message": self.to_string()
                }))
            }
            // Server-side failures are logged in full but reported generically
            _ => {
                error!("Request failed: {}", self);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "INTERNAL_ERROR",
                    "message": "An unexpected error occurred"
                }))
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<scoring_engine::Error> for ApiError {
    fn from(err: scoring_engine::Error) -> Self {
        if err.is_validation() {
            ApiError::ValidationError(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::ValidationError("Invalid age: must be between 18 and 100, got 17".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_map_to_server_error() {
        let errors = [
            ApiError::DatabaseError(sqlx::Error::RowNotFound),
            ApiError::InternalError("boom".into()),
        ];

        for err in errors {
            assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_engine_errors_convert() {
        let validation = "noon".parse::<scoring_engine::TimeOfDay>().unwrap_err();
        assert!(matches!(ApiError::from(validation), ApiError::ValidationError(_)));

        let recorder = scoring_engine::Error::Recorder("disk full".into());
        assert!(matches!(ApiError::from(recorder), ApiError::InternalError(_)));
    }
}
