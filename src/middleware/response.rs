use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Success envelope: `{"success": true, ...data}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    data: &'a T,
}

/// `{"drinks": [...]}` payload
#[derive(Debug, Serialize)]
pub struct DrinkList<T: Serialize> {
    pub drinks: Vec<T>,
}

/// `{"delete": id}` payload
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub delete: i64,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful 200 response
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> ApiResponse<DrinkList<T>> {
    pub fn drinks(drinks: Vec<T>) -> Self {
        Self::success(DrinkList { drinks })
    }
}

impl ApiResponse<Deleted> {
    pub fn deleted(id: i64) -> Self {
        Self::success(Deleted { delete: id })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            success: true,
            data: &self.data,
        };
        (StatusCode::OK, Json(envelope)).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
