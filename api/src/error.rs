use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::validation::FieldError;

/// Normalized request failure. Every failing path through the API funnels
/// into one of these, so the wire contract is always the
/// `{code, message, errors?}` envelope regardless of where the failure
/// originated.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Vec<FieldError>,
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Field-level validation failure, carrying the offending paths.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation Error".to_string(),
            errors,
            detail: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Persistence-error vocabulary → response vocabulary. A unique-index
/// violation becomes a 409 naming the duplicated field; a row that vanished
/// between an existence check and its mutation becomes the same 404 the
/// check itself would have produced.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                Self::not_found("The record to operate on does not exist")
            }
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                let field = match db.constraint() {
                    Some(c) if c.contains("phone") => "phone number",
                    Some(c) if c.contains("email") => "email",
                    _ => "value",
                };
                Self::conflict(format!("A record with this {field} already exists"))
            }
            _ => {
                tracing::error!(error = ?err, "database operation failed");
                Self::internal("An unexpected database error occurred").with_detail(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4().to_string();
        let body = ErrorBody {
            code: self.status.as_u16(),
            message: self.message,
            errors: self.errors,
            // Internal details stay server-side in production.
            detail: if is_production() { None } else { self.detail },
        };

        let mut response = (self.status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

fn is_production() -> bool {
    std::env::var("APP_ENV").map(|v| v == "production").unwrap_or(false)
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_404() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_carries_field_errors() {
        let err = ApiError::validation(vec![FieldError {
            path: "body.name".to_string(),
            message: "Name is required".to_string(),
        }]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].path, "body.name");
    }

    #[test]
    fn unclassified_errors_map_to_500() {
        let err = ApiError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
