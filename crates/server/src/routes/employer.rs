use crate::{
    dtos::feedback::{ConfirmationResponse, EmployerFeedbackRequest},
    error::ApiError,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::lookup::LookupService;
use models::{
    answer_sheet::AnswerSheet,
    feedback_type::QuestionCategory,
    submission::{EmployerFeedbackForm, FeedbackForm},
};

/// Submit employer feedback
#[utoipa::path(
    post,
    path = "/employer-feedback",
    request_body = EmployerFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = ConfirmationResponse),
        (status = 409, description = "The same submission is already in progress"),
        (status = 422, description = "Validation failed; the message says which field"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Feedback"
)]
pub async fn submit_employer_feedback(
    State(state): State<AppState>,
    Json(request): Json<EmployerFeedbackRequest>,
) -> Result<(StatusCode, Json<ConfirmationResponse>), ApiError> {
    let mut form = EmployerFeedbackForm {
        employer_name: request.employer_name,
        company: request.company,
        answers: AnswerSheet::default(),
    };
    form.validate_fields()?;

    let question_ids =
        LookupService::question_ids(&*state.db, &[QuestionCategory::Employer]).await?;
    form.answers = AnswerSheet::for_questions(question_ids);
    form.answers.answer_all(request.answers.into_iter().map(Into::into))?;

    let receipt = state.feedback.submit(&*state.db, &form).await?;

    Ok((StatusCode::CREATED, Json(receipt.into())))
}
