use crate::{
    dtos::report::StaffAssignmentResponse, error::ApiError, middleware::guard::SessionClaims,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use database::services::report::ReportService;

/// The signed-in staff member's subjects and how many students responded
#[utoipa::path(
    get,
    path = "/staff/dashboard",
    responses(
        (status = 200, description = "Staff mappings, newest cycle first", body = Vec<StaffAssignmentResponse>),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not a staff member"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Staff"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<StaffAssignmentResponse>>, ApiError> {
    let rows = ReportService::staff_overview(&*state.db, claims.user_id()?).await?;
    Ok(Json(rows.into_iter().map(StaffAssignmentResponse::from).collect()))
}
