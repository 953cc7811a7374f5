use super::submission::{SubmissionOrchestrator, SubmissionReceipt, SubmitError, write_dependent};
use crate::store::SeaStore;
use log::warn;
use models::submission::FeedbackForm;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

/// Writes validated feedback forms to the database
///
/// Each submission runs inside one transaction: if the children fail, the
/// transaction is dropped and the parent row goes with it.
#[derive(Debug, Clone, Default)]
pub struct FeedbackService {
    orchestrator: SubmissionOrchestrator,
}

impl FeedbackService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orchestrator(&self) -> &SubmissionOrchestrator {
        &self.orchestrator
    }

    /// Validates `form` and writes it; nothing reaches the database if validation fails
    pub async fn submit<F>(
        &self,
        db: &DatabaseConnection,
        form: &F,
    ) -> Result<SubmissionReceipt, SubmitError>
    where
        F: FeedbackForm,
        F::Submission: Sync,
    {
        let (submission, _ticket) = self.orchestrator.prepare(form)?;

        let txn = db.begin().await?;
        let receipt = write_dependent(&SeaStore(&txn), &submission)
            .await
            .map_err(|err| match err {
                SubmitError::ParentInsert { table, source } => {
                    let sql_err = source.sql_err();
                    parent_failure(table, source, sql_err)
                }
                other => other,
            })?;
        txn.commit().await?;

        Ok(receipt)
    }
}

/// Separates duplicate rows from other parent insert failures
fn parent_failure(table: &'static str, source: DbErr, sql_err: Option<SqlErr>) -> SubmitError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("Duplicate {table} row rejected: {detail}");
            SubmitError::AlreadySubmitted { table }
        }
        _ => SubmitError::ParentInsert { table, source },
    }
}
