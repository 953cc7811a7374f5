use crate::store::FeedbackStore;
use log::{error, info, warn};
use models::{
    error::ValidationError,
    submission::{Confirmation, DependentSubmission, FeedbackForm},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("an identical submission is already in progress")]
    AlreadySubmitting,
    /// A unique index rejected the parent row
    #[error("{table} row was already submitted")]
    AlreadySubmitted { table: &'static str },
    #[error("failed to insert {table} row: {source}")]
    ParentInsert { table: &'static str, source: DbErr },
    /// The parent row exists but has no children unless the store rolls it back
    #[error("inserted {table} row {parent_id} but failed to insert its children: {source}")]
    ChildInsert {
        table: &'static str,
        parent_id: i32,
        source: DbErr,
    },
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Result of a submission whose parent and children were both written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub parent_id: i32,
    pub children: u64,
    pub confirmation: Confirmation,
}

/// Keys of the submissions currently being written
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    /// Claims `key`, or returns `None` if another submission holds it
    pub fn try_acquire(&self, key: String) -> Option<InFlightTicket> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return None;
        }

        Some(InFlightTicket {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Releases its key when dropped
#[derive(Debug)]
pub struct InFlightTicket {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Runs form submissions as a parent insert followed by its children
#[derive(Debug, Clone, Default)]
pub struct SubmissionOrchestrator {
    in_flight: InFlight,
}

impl SubmissionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Validates the form and claims its in-flight slot without touching a store
    pub fn prepare<F: FeedbackForm>(
        &self,
        form: &F,
    ) -> Result<(F::Submission, InFlightTicket), SubmitError> {
        let submission = form.validate()?;
        let key = submission.dedup_key();

        match self.in_flight.try_acquire(key) {
            Some(ticket) => Ok((submission, ticket)),
            None => {
                warn!("Rejected duplicate submission {}", submission.dedup_key());
                Err(SubmitError::AlreadySubmitting)
            }
        }
    }

    pub async fn submit<S, F>(&self, store: &S, form: &F) -> Result<SubmissionReceipt, SubmitError>
    where
        S: FeedbackStore + ?Sized,
        F: FeedbackForm,
        F::Submission: Sync,
    {
        let (submission, _ticket) = self.prepare(form)?;
        write_dependent(store, &submission).await
    }
}

/// Inserts the parent, then the children built from its generated id.
///
/// The children are never sent unless the parent insert succeeded.
pub async fn write_dependent<S, D>(store: &S, submission: &D) -> Result<SubmissionReceipt, SubmitError>
where
    S: FeedbackStore + ?Sized,
    D: DependentSubmission + Sync,
{
    let parent = submission.parent();
    let table = parent.table();

    let parent_id = store.insert_parent(parent).await.map_err(|source| {
        error!("Failed to insert {table} row: {source}");
        SubmitError::ParentInsert { table, source }
    })?;

    let children = submission.children(parent_id);
    let child_count = children.len();
    let inserted = store.insert_children(children).await.map_err(|source| {
        error!("Failed to insert {child_count} children of {table} row {parent_id}: {source}");
        SubmitError::ChildInsert {
            table,
            parent_id,
            source,
        }
    })?;

    info!("Submitted {table} row {parent_id} with {inserted} children");
    Ok(SubmissionReceipt {
        parent_id,
        children: inserted,
        confirmation: submission.confirmation(),
    })
}
