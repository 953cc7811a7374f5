use axum::http::StatusCode;

/// Names the service; reachable without signing in
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Feedback API")
}
