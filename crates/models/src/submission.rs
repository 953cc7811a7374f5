//! Parent/child records written when a form is submitted.
//!
//! Every submission is one parent row followed by child rows that carry the
//! parent's generated id. Forms validate into a [`DependentSubmission`], which
//! knows how to build both halves.

use crate::{
    answer_sheet::{AnswerSheet, Score},
    batch::Batch,
    error::ValidationError,
    options::OptionItem,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFeedbackCycle {
    pub batch: i32,
    pub department_id: i32,
    pub regulation_id: i32,
    pub semester: i32,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAlumniResponse {
    pub alumni_name: String,
    pub batch: String,
    pub department_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployerResponse {
    pub employer_name: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStudentResponse {
    pub staff_mapping_id: i32,
    pub student_id: Uuid,
}

/// The primary row of a submission; its generated id is handed to the children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParentRecord {
    FeedbackCycle(NewFeedbackCycle),
    AlumniResponse(NewAlumniResponse),
    EmployerResponse(NewEmployerResponse),
    StudentResponse(NewStudentResponse),
}

impl ParentRecord {
    pub fn table(&self) -> &'static str {
        match self {
            Self::FeedbackCycle(_) => "feedback",
            Self::AlumniResponse(_) => "alumni_response",
            Self::EmployerResponse(_) => "employer_response",
            Self::StudentResponse(_) => "response",
        }
    }
}

/// A dependent row, always created with the id of an already inserted parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChildRecord {
    StaffAssignment {
        feedback_id: i32,
        staff_id: Uuid,
        subject_id: i32,
    },
    AlumniAnswer {
        alumni_response_id: i32,
        question_id: i32,
        score: Score,
    },
    EmployerAnswer {
        employer_response_id: i32,
        question_id: i32,
        score: Score,
    },
    StudentAnswer {
        response_id: i32,
        question_id: i32,
        score: Score,
    },
}

impl ChildRecord {
    pub fn parent_id(&self) -> i32 {
        match *self {
            Self::StaffAssignment { feedback_id, .. } => feedback_id,
            Self::AlumniAnswer {
                alumni_response_id, ..
            } => alumni_response_id,
            Self::EmployerAnswer {
                employer_response_id,
                ..
            } => employer_response_id,
            Self::StudentAnswer { response_id, .. } => response_id,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::StaffAssignment { .. } => "staff_mapping",
            Self::AlumniAnswer { .. } => "alumni_answers",
            Self::EmployerAnswer { .. } => "employer_answers",
            Self::StudentAnswer { .. } => "answer",
        }
    }
}

/// What the person sees once a submission went through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub message: String,
    pub navigate_to: Option<String>,
}

impl Confirmation {
    fn thank_you(navigate_to: &str) -> Self {
        Self {
            message: "Thank You For Your Feedback!!!".to_string(),
            navigate_to: Some(navigate_to.to_string()),
        }
    }
}

/// A validated submission, ready to be written as a parent and its children
pub trait DependentSubmission {
    /// Identifies the submission for duplicate detection while it is in flight
    fn dedup_key(&self) -> String;

    fn parent(&self) -> ParentRecord;

    fn children(&self, parent_id: i32) -> Vec<ChildRecord>;

    fn confirmation(&self) -> Confirmation;
}

/// Form state that validates locally into a [`DependentSubmission`]
pub trait FeedbackForm {
    type Submission: DependentSubmission;

    /// Checks the fields that need no lookup data, in the order the form shows them
    fn validate_fields(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Checks the form and reports the first rule it breaks
    fn validate(&self) -> Result<Self::Submission, ValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaffAssignment {
    pub subject_id: i32,
    pub staff_id: Uuid,
}

/// A publishable feedback cycle with every subject mapped to staff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCycleDraft {
    pub batch: Batch,
    pub department_id: i32,
    pub regulation_id: i32,
    pub semester: i32,
    pub section: String,
    pub assignments: Vec<StaffAssignment>,
}

impl DependentSubmission for FeedbackCycleDraft {
    fn dedup_key(&self) -> String {
        format!(
            "feedback:{}:{}:{}:{}:{}",
            self.batch, self.department_id, self.regulation_id, self.semester, self.section
        )
    }

    fn parent(&self) -> ParentRecord {
        ParentRecord::FeedbackCycle(NewFeedbackCycle {
            batch: self.batch.into(),
            department_id: self.department_id,
            regulation_id: self.regulation_id,
            semester: self.semester,
            section: self.section.clone(),
        })
    }

    fn children(&self, parent_id: i32) -> Vec<ChildRecord> {
        self.assignments
            .iter()
            .map(|a| ChildRecord::StaffAssignment {
                feedback_id: parent_id,
                staff_id: a.staff_id,
                subject_id: a.subject_id,
            })
            .collect()
    }

    fn confirmation(&self) -> Confirmation {
        Confirmation {
            message: "Feedback Published Successfully".to_string(),
            navigate_to: Some("/admin/dashboard".to_string()),
        }
    }
}

/// Alumni questionnaire (PEOs and POs) with the alumnus' details
#[derive(Debug, Clone, Default)]
pub struct AlumniFeedbackForm {
    pub alumni_name: String,
    pub batch: String,
    pub department: OptionItem,
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlumniFeedbackDraft {
    pub alumni_name: String,
    pub batch: Batch,
    pub department_id: i32,
    pub answers: Vec<(i32, Score)>,
}

impl FeedbackForm for AlumniFeedbackForm {
    type Submission = AlumniFeedbackDraft;

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.fields().map(|_| ())
    }

    fn validate(&self) -> Result<AlumniFeedbackDraft, ValidationError> {
        let (alumni_name, batch, department_id) = self.fields()?;

        Ok(AlumniFeedbackDraft {
            alumni_name: alumni_name.to_string(),
            batch,
            department_id,
            answers: self.answers.completed()?,
        })
    }
}

impl AlumniFeedbackForm {
    fn fields(&self) -> Result<(&str, Batch, i32), ValidationError> {
        let alumni_name = self.alumni_name.trim();
        if alumni_name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let batch: Batch = self.batch.trim().parse()?;
        let department_id = required_id(&self.department, ValidationError::MissingDepartment)?;
        Ok((alumni_name, batch, department_id))
    }
}

impl DependentSubmission for AlumniFeedbackDraft {
    fn dedup_key(&self) -> String {
        format!(
            "alumni:{}:{}:{}",
            self.alumni_name.to_lowercase(),
            self.batch,
            self.department_id
        )
    }

    fn parent(&self) -> ParentRecord {
        ParentRecord::AlumniResponse(NewAlumniResponse {
            alumni_name: self.alumni_name.clone(),
            batch: self.batch.to_string(),
            department_id: self.department_id,
        })
    }

    fn children(&self, parent_id: i32) -> Vec<ChildRecord> {
        self.answers
            .iter()
            .map(|&(question_id, score)| ChildRecord::AlumniAnswer {
                alumni_response_id: parent_id,
                question_id,
                score,
            })
            .collect()
    }

    fn confirmation(&self) -> Confirmation {
        Confirmation::thank_you("/")
    }
}

/// Employer questionnaire with the employer's details
#[derive(Debug, Clone, Default)]
pub struct EmployerFeedbackForm {
    pub employer_name: String,
    pub company: String,
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerFeedbackDraft {
    pub employer_name: String,
    pub company: String,
    pub answers: Vec<(i32, Score)>,
}

impl FeedbackForm for EmployerFeedbackForm {
    type Submission = EmployerFeedbackDraft;

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.fields().map(|_| ())
    }

    fn validate(&self) -> Result<EmployerFeedbackDraft, ValidationError> {
        let (employer_name, company) = self.fields()?;

        Ok(EmployerFeedbackDraft {
            employer_name: employer_name.to_string(),
            company: company.to_string(),
            answers: self.answers.completed()?,
        })
    }
}

impl EmployerFeedbackForm {
    fn fields(&self) -> Result<(&str, &str), ValidationError> {
        let employer_name = self.employer_name.trim();
        if employer_name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let company = self.company.trim();
        if company.is_empty() {
            return Err(ValidationError::MissingCompany);
        }
        Ok((employer_name, company))
    }
}

impl DependentSubmission for EmployerFeedbackDraft {
    fn dedup_key(&self) -> String {
        format!(
            "employer:{}:{}",
            self.employer_name.to_lowercase(),
            self.company.to_lowercase()
        )
    }

    fn parent(&self) -> ParentRecord {
        ParentRecord::EmployerResponse(NewEmployerResponse {
            employer_name: self.employer_name.clone(),
            company: self.company.clone(),
        })
    }

    fn children(&self, parent_id: i32) -> Vec<ChildRecord> {
        self.answers
            .iter()
            .map(|&(question_id, score)| ChildRecord::EmployerAnswer {
                employer_response_id: parent_id,
                question_id,
                score,
            })
            .collect()
    }

    fn confirmation(&self) -> Confirmation {
        Confirmation::thank_you("/")
    }
}

/// A student's course or lab feedback for one staff mapping
#[derive(Debug, Clone)]
pub struct StudentFeedbackForm {
    pub staff_mapping_id: i32,
    pub student_id: Uuid,
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFeedbackDraft {
    pub staff_mapping_id: i32,
    pub student_id: Uuid,
    pub answers: Vec<(i32, Score)>,
}

impl FeedbackForm for StudentFeedbackForm {
    type Submission = StudentFeedbackDraft;

    fn validate(&self) -> Result<StudentFeedbackDraft, ValidationError> {
        Ok(StudentFeedbackDraft {
            staff_mapping_id: self.staff_mapping_id,
            student_id: self.student_id,
            answers: self.answers.completed()?,
        })
    }
}

impl DependentSubmission for StudentFeedbackDraft {
    fn dedup_key(&self) -> String {
        format!("response:{}:{}", self.staff_mapping_id, self.student_id)
    }

    fn parent(&self) -> ParentRecord {
        ParentRecord::StudentResponse(NewStudentResponse {
            staff_mapping_id: self.staff_mapping_id,
            student_id: self.student_id,
        })
    }

    fn children(&self, parent_id: i32) -> Vec<ChildRecord> {
        self.answers
            .iter()
            .map(|&(question_id, score)| ChildRecord::StudentAnswer {
                response_id: parent_id,
                question_id,
                score,
            })
            .collect()
    }

    fn confirmation(&self) -> Confirmation {
        Confirmation::thank_you("/stud/dashboard")
    }
}

fn required_id(option: &OptionItem, missing: ValidationError) -> Result<i32, ValidationError> {
    if option.is_unset() {
        return Err(missing);
    }
    option.id.trim().parse().map_err(|_| missing)
}
