use crate::{
    dtos::{
        feedback::{ConfirmationResponse, PublishFeedbackRequest},
        lookup::StaffResponse,
        report::{
            AlumniResponseRow, EmployerResponseRow, MappingReportResponse,
            QuestionSummaryResponse, ReportResponse, ResponseListResponse,
        },
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::{lookup::LookupService, report::ReportService};
use models::{
    error::ValidationError,
    feedback_type::{ReportKind, ResponseType},
    options::{OptionItem, StaffOption},
    publish_form::PublishForm,
    submission::FeedbackForm,
};
use std::collections::HashMap;

/// Staff available for mapping
#[utoipa::path(
    get,
    path = "/admin/staff",
    responses(
        (status = 200, description = "Staff members by name", body = Vec<StaffResponse>),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Admin"
)]
pub async fn staff(State(state): State<AppState>) -> Result<Json<Vec<StaffResponse>>, ApiError> {
    let staff = LookupService::staff_options(&*state.db).await?;
    Ok(Json(staff.into_iter().map(StaffResponse::from).collect()))
}

/// Publish a feedback cycle with its staff mapping
///
/// The subject list is loaded for the selected department, regulation and
/// semester; every one of those subjects must be assigned a staff member.
#[utoipa::path(
    post,
    path = "/admin/feedback",
    request_body = PublishFeedbackRequest,
    responses(
        (status = 201, description = "Feedback cycle published", body = ConfirmationResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "The same cycle is already being published"),
        (status = 422, description = "Validation failed; the message says which field"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Admin"
)]
pub async fn publish_feedback(
    State(state): State<AppState>,
    Json(request): Json<PublishFeedbackRequest>,
) -> Result<(StatusCode, Json<ConfirmationResponse>), ApiError> {
    let mut form = PublishForm::new();
    form.set_batch(request.batch);
    form.set_section(&request.section);

    let select = |id: Option<i32>| id.map(|id| OptionItem::new(id, "")).unwrap_or_default();
    form.set_department(select(request.department_id));
    form.set_regulation(select(request.regulation_id));
    form.set_semester(select(request.semester));

    form.validate_fields()?;

    if let Some(query) = form.subject_query() {
        let subjects = LookupService::dept_subjects(&*state.db, query).await?;
        form.load_subjects(query, subjects);
        form.show_staff_mapping();

        if !request.assignments.is_empty() {
            let names: HashMap<_, _> = LookupService::staff_options(&*state.db)
                .await?
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect();

            for assignment in request.assignments {
                let name = names
                    .get(&assignment.staff_id)
                    .cloned()
                    .ok_or(ValidationError::UnknownStaff(assignment.staff_id))?;
                let staff = StaffOption {
                    id: assignment.staff_id,
                    name,
                };
                form.assign_staff(assignment.subject_id, staff)?;
            }
        }
    }

    let receipt = state.feedback.submit(&*state.db, &form).await?;

    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// Aggregated feedback scores
#[utoipa::path(
    get,
    path = "/admin/reports/{report}",
    params(
        ("report" = String, Path, description = "stud_course, stud_lab, alumni or employer")
    ),
    responses(
        (status = 200, description = "Report rows", body = ReportResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown report"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Admin"
)]
pub async fn report(
    State(state): State<AppState>,
    Path(report): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let kind: ReportKind = report.parse().map_err(|_| ApiError::NotFound("report"))?;

    if let Some(feedback_type) = kind.student_feedback() {
        let rows = ReportService::student_report(&*state.db, feedback_type).await?;
        let rows = rows.into_iter().map(MappingReportResponse::from).collect();
        return Ok(Json(ReportResponse::Mappings(rows)));
    }

    let rows = if kind == ReportKind::Alumni {
        ReportService::alumni_report(&*state.db).await?
    } else {
        ReportService::employer_report(&*state.db).await?
    };
    let response =
        ReportResponse::Questions(rows.into_iter().map(QuestionSummaryResponse::from).collect());

    Ok(Json(response))
}

/// Alumni or employer responses, newest first
#[utoipa::path(
    get,
    path = "/admin/response-list/{response_type}",
    params(
        ("response_type" = String, Path, description = "alumni or employer")
    ),
    responses(
        (status = 200, description = "Response rows", body = ResponseListResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown response type"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Admin"
)]
pub async fn response_list(
    State(state): State<AppState>,
    Path(response_type): Path<String>,
) -> Result<Json<ResponseListResponse>, ApiError> {
    let response_type: ResponseType = response_type
        .parse()
        .map_err(|_| ApiError::NotFound("response type"))?;

    let response = match response_type {
        ResponseType::Alumni => {
            let rows = ReportService::alumni_responses(&*state.db).await?;
            ResponseListResponse::Alumni(rows.into_iter().map(AlumniResponseRow::from).collect())
        }
        ResponseType::Employer => {
            let rows = ReportService::employer_responses(&*state.db).await?;
            ResponseListResponse::Employer(rows.into_iter().map(EmployerResponseRow::from).collect())
        }
    };

    Ok(Json(response))
}
