use thiserror::Error;
use uuid::Uuid;

/// A local validation failure, reported before the backend is contacted.
///
/// The `Display` text is the message shown to the person filling the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please Enter Your Name")]
    MissingName,
    #[error("Please Enter Your Batch")]
    MissingBatch,
    #[error("Please Enter a Valid Batch")]
    InvalidBatch,
    #[error("Please Select Your Department")]
    MissingDepartment,
    #[error("Please Enter Your Company")]
    MissingCompany,
    #[error("Please Enter the Section")]
    MissingSection,
    #[error("Please Select the Regulation")]
    MissingRegulation,
    #[error("Please Select the Semester")]
    MissingSemester,
    #[error("Please Assign Staff To Every Subject")]
    IncompleteStaffMapping,
    #[error("Please Answer Every Question")]
    UnansweredQuestions,
    #[error("Unknown question {0}")]
    UnknownQuestion(i32),
    #[error("Unknown subject {0}")]
    UnknownSubject(i32),
    #[error("Unknown staff {0}")]
    UnknownStaff(Uuid),
    #[error("Score must be between 1 and 3")]
    ScoreOutOfRange,
}
