use chrono::{DateTime, FixedOffset};
use database::{
    entities::{alumni_responses, employer_responses},
    services::report::{MappingReport, StaffAssignmentOverview},
};
use models::report::QuestionSummary;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionSummaryResponse {
    pub question_id: i32,
    pub responses: u32,
    pub mean: f64,
    /// Counts of Fair, Good and Excellent answers
    pub distribution: Vec<u32>,
}

impl From<QuestionSummary> for QuestionSummaryResponse {
    fn from(summary: QuestionSummary) -> Self {
        Self {
            question_id: summary.question_id,
            responses: summary.responses,
            mean: summary.mean,
            distribution: summary.distribution.to_vec(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MappingReportResponse {
    pub staff_mapping_id: i32,
    pub feedback_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub staff_name: String,
    pub responses: usize,
    pub overall: Option<f64>,
    pub questions: Vec<QuestionSummaryResponse>,
}

impl From<MappingReport> for MappingReportResponse {
    fn from(report: MappingReport) -> Self {
        Self {
            staff_mapping_id: report.staff_mapping_id,
            feedback_id: report.feedback_id,
            subject_code: report.subject_code,
            subject_name: report.subject_name,
            staff_name: report.staff_name,
            responses: report.responses,
            overall: report.overall,
            questions: report
                .questions
                .into_iter()
                .map(QuestionSummaryResponse::from)
                .collect(),
        }
    }
}

/// Student reports are per staff mapping; alumni and employer reports are per question
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ReportResponse {
    Mappings(Vec<MappingReportResponse>),
    Questions(Vec<QuestionSummaryResponse>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlumniResponseRow {
    pub id: i32,
    pub alumni_name: String,
    pub batch: String,
    pub department_id: i32,
    pub created_at: DateTime<FixedOffset>,
}

impl From<alumni_responses::Model> for AlumniResponseRow {
    fn from(row: alumni_responses::Model) -> Self {
        Self {
            id: row.id,
            alumni_name: row.alumni_name,
            batch: row.batch,
            department_id: row.dept_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployerResponseRow {
    pub id: i32,
    pub employer_name: String,
    pub company: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<employer_responses::Model> for EmployerResponseRow {
    fn from(row: employer_responses::Model) -> Self {
        Self {
            id: row.id,
            employer_name: row.employer_name,
            company: row.company,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ResponseListResponse {
    Alumni(Vec<AlumniResponseRow>),
    Employer(Vec<EmployerResponseRow>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffAssignmentResponse {
    pub staff_mapping_id: i32,
    pub feedback_id: i32,
    pub batch: i32,
    pub semester: i32,
    pub section: String,
    pub subject_code: String,
    pub subject_name: String,
    pub responses: usize,
}

impl From<StaffAssignmentOverview> for StaffAssignmentResponse {
    fn from(row: StaffAssignmentOverview) -> Self {
        Self {
            staff_mapping_id: row.staff_mapping_id,
            feedback_id: row.feedback_id,
            batch: row.batch,
            semester: row.semester,
            section: row.section,
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            responses: row.responses,
        }
    }
}
