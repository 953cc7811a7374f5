use crate::{
    dtos::feedback::{ConfirmationResponse, FeedbackListItemResponse, StudentFeedbackRequest},
    error::ApiError,
    middleware::guard::SessionClaims,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::{lookup::LookupService, student::StudentFeedbackService};
use models::{answer_sheet::AnswerSheet, feedback_type::FeedbackType, submission::StudentFeedbackForm};

/// Subjects of the student's current feedback cycle
#[utoipa::path(
    get,
    path = "/stud/feedback-list/{feedback_type}",
    params(
        ("feedback_type" = String, Path, description = "course or lab")
    ),
    responses(
        (status = 200, description = "Staff mappings, with those already answered flagged", body = Vec<FeedbackListItemResponse>),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not a student"),
        (status = 404, description = "Unknown feedback type or no student profile"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Student"
)]
pub async fn feedback_list(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(feedback_type): Path<String>,
) -> Result<Json<Vec<FeedbackListItemResponse>>, ApiError> {
    let feedback_type: FeedbackType = feedback_type
        .parse()
        .map_err(|_| ApiError::NotFound("feedback type"))?;

    let profile = StudentFeedbackService::profile(&*state.db, claims.user_id()?).await?;
    let items = StudentFeedbackService::feedback_list(&*state.db, &profile, feedback_type).await?;

    Ok(Json(items.into_iter().map(FeedbackListItemResponse::from).collect()))
}

/// Submit course or lab feedback for one staff mapping
#[utoipa::path(
    post,
    path = "/stud/feedback/{staff_mapping_id}",
    params(
        ("staff_mapping_id" = i32, Path, description = "Staff mapping being reviewed")
    ),
    request_body = StudentFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = ConfirmationResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not a student"),
        (status = 404, description = "The mapping is not part of the student's current cycle"),
        (status = 409, description = "Feedback was already submitted"),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Student"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(staff_mapping_id): Path<i32>,
    Json(request): Json<StudentFeedbackRequest>,
) -> Result<(StatusCode, Json<ConfirmationResponse>), ApiError> {
    let profile = StudentFeedbackService::profile(&*state.db, claims.user_id()?).await?;
    let target =
        StudentFeedbackService::feedback_target(&*state.db, &profile, staff_mapping_id).await?;

    let category = target.feedback_type.question_category();
    let question_ids = LookupService::question_ids(&*state.db, &[category]).await?;
    let mut answers = AnswerSheet::for_questions(question_ids);
    answers.answer_all(request.answers.into_iter().map(Into::into))?;

    let form = StudentFeedbackForm {
        staff_mapping_id: target.staff_mapping_id,
        student_id: profile.id,
        answers,
    };
    let receipt = state.feedback.submit(&*state.db, &form).await?;

    Ok((StatusCode::CREATED, Json(receipt.into())))
}
