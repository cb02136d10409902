// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// Every failure a handler can surface. Nothing else reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    // 404 Not Found
    #[error("Resource you are trying to modify is not found")]
    NotFound,

    // 405 Method Not Allowed (known path, unsupported verb)
    #[error("Method not allowed")]
    MethodNotAllowed,

    // 422 Unprocessable Entity (bad input and any store failure)
    #[error("Unprocessable data, please check your data")]
    Unprocessable,

    // 401 Unauthorized
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(err) => err.status_code(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let message = match self {
            ApiError::Unauthorized(err) => json!({
                "code": err.code(),
                "description": err.description(),
            }),
            other => Value::String(other.to_string()),
        };

        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": message,
        })
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return the generic 422
        tracing::error!("Database error: {}", err);
        ApiError::Unprocessable
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
