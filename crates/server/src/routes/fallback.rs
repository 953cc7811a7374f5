use crate::error::ApiError;

/// Any path without a route
pub async fn not_found() -> ApiError {
    ApiError::NotFound("page")
}
