use database::{entities::question_options, services::lookup::QuestionWithOptions};
use models::{
    options::{OptionItem, StaffOption, SubjectOption},
    publish_form::SubjectQuery,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// One dropdown entry
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionResponse {
    pub id: String,
    pub text: String,
}

impl From<OptionItem> for OptionResponse {
    fn from(option: OptionItem) -> Self {
        Self {
            id: option.id,
            text: option.text,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    /// `"code - name"`, as shown in the staff mapping table
    pub label: String,
    pub is_theory: bool,
}

impl From<SubjectOption> for SubjectResponse {
    fn from(subject: SubjectOption) -> Self {
        Self {
            label: subject.label(),
            id: subject.id,
            code: subject.code,
            name: subject.name,
            is_theory: subject.is_theory,
        }
    }
}

/// Subjects grouped the way the staff mapping section renders them
#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectsResponse {
    pub theory: Vec<SubjectResponse>,
    pub lab: Vec<SubjectResponse>,
}

impl From<Vec<SubjectOption>> for SubjectsResponse {
    fn from(subjects: Vec<SubjectOption>) -> Self {
        let (theory, lab): (Vec<_>, Vec<_>) = subjects.into_iter().partition(|s| s.is_theory);
        Self {
            theory: theory.into_iter().map(SubjectResponse::from).collect(),
            lab: lab.into_iter().map(SubjectResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<StaffOption> for StaffResponse {
    fn from(staff: StaffOption) -> Self {
        Self {
            id: staff.id,
            name: staff.name,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams)]
pub struct SubjectQueryParams {
    pub department_id: i32,
    pub regulation_id: i32,
    /// 1 to 8
    pub semester: i32,
}

impl From<SubjectQueryParams> for SubjectQuery {
    fn from(params: SubjectQueryParams) -> Self {
        Self {
            department_id: params.department_id,
            regulation_id: params.regulation_id,
            semester: params.semester,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionOptionResponse {
    pub option: String,
    pub value: i32,
}

impl From<question_options::Model> for QuestionOptionResponse {
    fn from(option: question_options::Model) -> Self {
        Self {
            option: option.option,
            value: option.value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    /// `peo`, `po`, `employer`, `course` or `lab`
    pub feedback_type: String,
    pub question_no: i32,
    pub question: String,
    pub options: Vec<QuestionOptionResponse>,
}

impl From<QuestionWithOptions> for QuestionResponse {
    fn from((question, options): QuestionWithOptions) -> Self {
        Self {
            id: question.id,
            feedback_type: question.feedback_type.to_string(),
            question_no: question.question_no,
            question: question.question,
            options: options.into_iter().map(QuestionOptionResponse::from).collect(),
        }
    }
}
