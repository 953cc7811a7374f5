use std::sync::Arc;

use database::services::feedback::FeedbackService;
use sea_orm::DatabaseConnection;

/// Shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    /// Clones share one in-flight submission set
    pub feedback: FeedbackService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db: Arc::new(db),
            feedback: FeedbackService::new(),
        }
    }
}
