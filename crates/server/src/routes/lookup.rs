use crate::{
    dtos::lookup::{OptionResponse, QuestionResponse, SubjectQueryParams, SubjectsResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::lookup::LookupService;
use models::{feedback_type::QuestionCategory, options::semester_options};

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Departments by name", body = Vec<OptionResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lookups"
)]
pub async fn departments(State(state): State<AppState>) -> Result<Json<Vec<OptionResponse>>, ApiError> {
    let options = LookupService::department_options(&*state.db).await?;
    Ok(Json(options.into_iter().map(OptionResponse::from).collect()))
}

/// List regulations
#[utoipa::path(
    get,
    path = "/regulations",
    responses(
        (status = 200, description = "Regulations, newest first", body = Vec<OptionResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lookups"
)]
pub async fn regulations(State(state): State<AppState>) -> Result<Json<Vec<OptionResponse>>, ApiError> {
    let options = LookupService::regulation_options(&*state.db).await?;
    Ok(Json(options.into_iter().map(OptionResponse::from).collect()))
}

/// List semesters
#[utoipa::path(
    get,
    path = "/semesters",
    responses(
        (status = 200, description = "Semesters 1 to 8", body = Vec<OptionResponse>)
    ),
    tag = "Lookups"
)]
pub async fn semesters() -> Json<Vec<OptionResponse>> {
    Json(semester_options().into_iter().map(OptionResponse::from).collect())
}

/// Subjects of a department in one semester of a regulation
#[utoipa::path(
    get,
    path = "/subjects",
    params(SubjectQueryParams),
    responses(
        (status = 200, description = "Theory and lab subjects", body = SubjectsResponse),
        (status = 400, description = "Missing or invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lookups"
)]
pub async fn subjects(
    State(state): State<AppState>,
    Query(params): Query<SubjectQueryParams>,
) -> Result<Json<SubjectsResponse>, ApiError> {
    let subjects = LookupService::dept_subjects(&*state.db, params.into()).await?;
    Ok(Json(subjects.into()))
}

/// Questionnaire for a feedback type, with its answer options
#[utoipa::path(
    get,
    path = "/questions/{feedback_type}",
    params(
        ("feedback_type" = String, Path, description = "alumni, peo, po, employer, course or lab")
    ),
    responses(
        (status = 200, description = "Questions in display order", body = Vec<QuestionResponse>),
        (status = 404, description = "Unknown feedback type"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lookups"
)]
pub async fn questions(
    State(state): State<AppState>,
    Path(feedback_type): Path<String>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let categories = question_categories(&feedback_type)?;
    let questions = LookupService::questions(&*state.db, &categories).await?;
    Ok(Json(questions.into_iter().map(QuestionResponse::from).collect()))
}

/// `alumni` expands to the categories of the alumni questionnaire
pub(crate) fn question_categories(feedback_type: &str) -> Result<Vec<QuestionCategory>, ApiError> {
    if feedback_type == "alumni" {
        return Ok(QuestionCategory::ALUMNI.to_vec());
    }

    feedback_type
        .parse::<QuestionCategory>()
        .map(|category| vec![category])
        .map_err(|_| ApiError::NotFound("feedback type"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_question_categories() {
        assert_eq!(
            question_categories("alumni").unwrap(),
            vec![QuestionCategory::Peo, QuestionCategory::Po]
        );
        assert_eq!(
            question_categories("lab").unwrap(),
            vec![QuestionCategory::Lab]
        );
        assert!(matches!(
            question_categories("parents"),
            Err(ApiError::NotFound(_))
        ));
    }
}
