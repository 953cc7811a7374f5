use sea_orm::DbErr;
use thiserror::Error;

pub mod feedback;
pub mod lookup;
pub mod report;
pub mod student;
pub mod submission;

/// Failures of the read-side services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Database(#[from] DbErr),
}
