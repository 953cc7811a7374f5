use crate::{
    batch::Batch,
    error::ValidationError,
    options::{OptionItem, StaffOption, SubjectOption},
    staff_mapping::StaffMapping,
    submission::{FeedbackCycleDraft, FeedbackForm, StaffAssignment},
};
use serde::{Deserialize, Serialize};

/// Batch the publish form starts with
pub const DEFAULT_BATCH: &str = "2024";

/// The upstream selection a subject list depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectQuery {
    pub department_id: i32,
    pub regulation_id: i32,
    pub semester: i32,
}

/// State of the admin form that publishes a feedback cycle
///
/// Department, regulation and semester decide which subjects need staff. Any
/// change to them throws away the loaded subjects and the mapping; the caller
/// fetches subjects for the returned [`SubjectQuery`] and hands them back via
/// [`PublishForm::load_subjects`].
#[derive(Debug, Clone)]
pub struct PublishForm {
    batch: String,
    department: OptionItem,
    section: String,
    semester: OptionItem,
    regulation: OptionItem,
    subjects: Vec<SubjectOption>,
    loaded_for: Option<SubjectQuery>,
    mapping: StaffMapping,
    staff_mapping_visible: bool,
}

impl Default for PublishForm {
    fn default() -> Self {
        Self {
            batch: DEFAULT_BATCH.to_string(),
            department: OptionItem::default(),
            section: String::new(),
            semester: OptionItem::default(),
            regulation: OptionItem::default(),
            subjects: Vec::new(),
            loaded_for: None,
            mapping: StaffMapping::default(),
            staff_mapping_visible: false,
        }
    }
}

impl PublishForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> &str {
        &self.batch
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn department(&self) -> &OptionItem {
        &self.department
    }

    pub fn regulation(&self) -> &OptionItem {
        &self.regulation
    }

    pub fn semester(&self) -> &OptionItem {
        &self.semester
    }

    pub fn mapping(&self) -> &StaffMapping {
        &self.mapping
    }

    pub fn subjects(&self) -> &[SubjectOption] {
        &self.subjects
    }

    pub fn set_batch(&mut self, batch: impl Into<String>) {
        self.batch = batch.into();
    }

    /// Sections are always stored uppercased
    pub fn set_section(&mut self, section: &str) {
        self.section = section.trim().to_uppercase();
    }

    pub fn set_department(&mut self, department: OptionItem) -> Option<SubjectQuery> {
        if self.department == department {
            return None;
        }
        self.department = department;
        self.invalidate_subjects();
        self.subject_query()
    }

    pub fn set_regulation(&mut self, regulation: OptionItem) -> Option<SubjectQuery> {
        if self.regulation == regulation {
            return None;
        }
        self.regulation = regulation;
        self.invalidate_subjects();
        self.subject_query()
    }

    pub fn set_semester(&mut self, semester: OptionItem) -> Option<SubjectQuery> {
        if self.semester == semester {
            return None;
        }
        self.semester = semester;
        self.invalidate_subjects();
        self.subject_query()
    }

    /// The subject list the current selection needs, once all three are chosen
    pub fn subject_query(&self) -> Option<SubjectQuery> {
        Some(SubjectQuery {
            department_id: parse_id(&self.department)?,
            regulation_id: parse_id(&self.regulation)?,
            semester: parse_id(&self.semester)?,
        })
    }

    /// Installs the subjects fetched for `query` and resets the mapping skeleton.
    ///
    /// Returns `false` and changes nothing when `query` is no longer the
    /// current selection.
    pub fn load_subjects(&mut self, query: SubjectQuery, subjects: Vec<SubjectOption>) -> bool {
        if self.subject_query() != Some(query) {
            return false;
        }

        self.mapping = StaffMapping::skeleton(&subjects);
        self.subjects = subjects;
        self.loaded_for = Some(query);
        self.staff_mapping_visible = false;
        true
    }

    pub fn show_staff_mapping(&mut self) {
        self.staff_mapping_visible = true;
    }

    pub fn is_staff_mapping_visible(&self) -> bool {
        self.staff_mapping_visible
    }

    pub fn theory_subjects(&self) -> impl Iterator<Item = &SubjectOption> {
        self.subjects.iter().filter(|s| s.is_theory)
    }

    pub fn lab_subjects(&self) -> impl Iterator<Item = &SubjectOption> {
        self.subjects.iter().filter(|s| !s.is_theory)
    }

    pub fn assign_staff(&mut self, subject_id: i32, staff: StaffOption) -> Result<(), ValidationError> {
        self.mapping.assign(subject_id, staff)
    }

    pub fn is_publish_disabled(&self) -> bool {
        !self.mapping.is_complete()
    }

    /// Batch, department, section, semester and regulation, in that order
    fn fields(&self) -> Result<(Batch, SubjectQuery), ValidationError> {
        let batch: Batch = self.batch.trim().parse()?;
        let department_id = parse_id(&self.department).ok_or(ValidationError::MissingDepartment)?;
        if self.section.is_empty() {
            return Err(ValidationError::MissingSection);
        }
        let semester = parse_id(&self.semester).ok_or(ValidationError::MissingSemester)?;
        let regulation_id = parse_id(&self.regulation).ok_or(ValidationError::MissingRegulation)?;

        Ok((
            batch,
            SubjectQuery {
                department_id,
                regulation_id,
                semester,
            },
        ))
    }

    fn invalidate_subjects(&mut self) {
        self.subjects.clear();
        self.loaded_for = None;
        self.mapping = StaffMapping::default();
        self.staff_mapping_visible = false;
    }
}

impl FeedbackForm for PublishForm {
    type Submission = FeedbackCycleDraft;

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.fields().map(|_| ())
    }

    fn validate(&self) -> Result<FeedbackCycleDraft, ValidationError> {
        let (batch, SubjectQuery { department_id, regulation_id, semester }) = self.fields()?;

        let assignments = match self.mapping.assignments() {
            Some(pairs) if self.loaded_for == self.subject_query() => pairs
                .into_iter()
                .map(|(subject_id, staff)| StaffAssignment {
                    subject_id,
                    staff_id: staff.id,
                })
                .collect(),
            _ => return Err(ValidationError::IncompleteStaffMapping),
        };

        Ok(FeedbackCycleDraft {
            batch,
            department_id,
            regulation_id,
            semester,
            section: self.section.clone(),
            assignments,
        })
    }
}

fn parse_id(option: &OptionItem) -> Option<i32> {
    if option.is_unset() {
        return None;
    }
    option.id.trim().parse().ok()
}
