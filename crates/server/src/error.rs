use crate::dtos::feedback::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::{ServiceError, submission::SubmitError};
use log::error;
use models::{
    error::ValidationError,
    guard::{FORBIDDEN_PATH, NOT_FOUND_PATH, SIGN_IN_PATH},
};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("an identical submission is already in progress")]
    AlreadySubmitting,
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("sign in required")]
    Unauthenticated,
    #[error("you are not allowed to view this page")]
    Forbidden,
    #[error("session is still loading")]
    SessionLoading,
    #[error(transparent)]
    Submission(SubmitError),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(err) => Self::Validation(err),
            SubmitError::AlreadySubmitting => Self::AlreadySubmitting,
            SubmitError::AlreadySubmitted { .. } => Self::Conflict("feedback already submitted"),
            other => Self::Submission(other),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(what) => Self::NotFound(what),
            ServiceError::Conflict(what) => Self::Conflict(what),
            ServiceError::Database(err) => Self::Database(err),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AlreadySubmitting | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::SessionLoading => StatusCode::SERVICE_UNAVAILABLE,
            Self::Submission(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Page the client should navigate to instead of the requested one
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::NotFound(_) => Some(NOT_FOUND_PATH),
            Self::Unauthenticated => Some(SIGN_IN_PATH),
            Self::Forbidden => Some(FORBIDDEN_PATH),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!("Request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            redirect: self.redirect().map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}
