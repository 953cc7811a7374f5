use crate::{
    dtos::feedback::{AlumniFeedbackRequest, ConfirmationResponse},
    error::ApiError,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::lookup::LookupService;
use models::{
    answer_sheet::AnswerSheet, feedback_type::QuestionCategory, options::OptionItem,
    submission::{AlumniFeedbackForm, FeedbackForm},
};

/// Submit alumni feedback
#[utoipa::path(
    post,
    path = "/alumni-feedback",
    request_body = AlumniFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = ConfirmationResponse),
        (status = 409, description = "The same submission is already in progress"),
        (status = 422, description = "Validation failed; the message says which field"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Feedback"
)]
pub async fn submit_alumni_feedback(
    State(state): State<AppState>,
    Json(request): Json<AlumniFeedbackRequest>,
) -> Result<(StatusCode, Json<ConfirmationResponse>), ApiError> {
    let mut form = AlumniFeedbackForm {
        alumni_name: request.alumni_name,
        batch: request.batch,
        department: request
            .department_id
            .map(|id| OptionItem::new(id, ""))
            .unwrap_or_default(),
        answers: AnswerSheet::default(),
    };
    form.validate_fields()?;

    let question_ids = LookupService::question_ids(&*state.db, &QuestionCategory::ALUMNI).await?;
    form.answers = AnswerSheet::for_questions(question_ids);
    form.answers.answer_all(request.answers.into_iter().map(Into::into))?;

    let receipt = state.feedback.submit(&*state.db, &form).await?;

    Ok((StatusCode::CREATED, Json(receipt.into())))
}
