use database::services::{student::FeedbackListItem, submission::SubmissionReceipt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Page the client should navigate to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct AnswerRequest {
    pub question_id: i32,
    /// 1 = Fair, 2 = Good, 3 = Excellent
    pub score: i32,
}

impl From<AnswerRequest> for (i32, i32) {
    fn from(answer: AnswerRequest) -> Self {
        (answer.question_id, answer.score)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct StaffAssignmentRequest {
    pub subject_id: i32,
    pub staff_id: Uuid,
}

/// Publishes a feedback cycle for one class
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishFeedbackRequest {
    #[serde(default)]
    pub batch: String,
    pub department_id: Option<i32>,
    pub regulation_id: Option<i32>,
    pub semester: Option<i32>,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub assignments: Vec<StaffAssignmentRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AlumniFeedbackRequest {
    #[serde(default)]
    pub alumni_name: String,
    #[serde(default)]
    pub batch: String,
    pub department_id: Option<i32>,
    #[serde(default)]
    pub answers: Vec<AnswerRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployerFeedbackRequest {
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub answers: Vec<AnswerRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentFeedbackRequest {
    #[serde(default)]
    pub answers: Vec<AnswerRequest>,
}

/// Returned once a submission and all its dependent rows are stored
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmationResponse {
    pub id: i32,
    pub saved_rows: u64,
    pub message: String,
    pub navigate_to: Option<String>,
}

impl From<SubmissionReceipt> for ConfirmationResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            id: receipt.parent_id,
            saved_rows: receipt.children,
            message: receipt.confirmation.message,
            navigate_to: receipt.confirmation.navigate_to,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackListItemResponse {
    pub staff_mapping_id: i32,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub staff_name: String,
    /// Already submitted; the entry is shown disabled
    pub answered: bool,
}

impl From<FeedbackListItem> for FeedbackListItemResponse {
    fn from(item: FeedbackListItem) -> Self {
        Self {
            staff_mapping_id: item.staff_mapping_id,
            subject_id: item.subject_id,
            subject_code: item.subject_code,
            subject_name: item.subject_name,
            staff_name: item.staff_name,
            answered: item.answered,
        }
    }
}
