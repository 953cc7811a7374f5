use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of semesters offered by every regulation
pub const SEMESTER_COUNT: i32 = 8;

/// A single entry of a dropdown: an identifier and the label shown for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub text: String,
}

impl OptionItem {
    pub fn new(id: impl ToString, text: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            text: text.into(),
        }
    }

    /// An option with an empty id stands for "nothing selected"
    pub fn is_unset(&self) -> bool {
        self.id.trim().is_empty()
    }
}

/// Semesters `1..=8`, labelled by their number
pub fn semester_options() -> Vec<OptionItem> {
    (1..=SEMESTER_COUNT)
        .map(|sem| OptionItem::new(sem, sem.to_string()))
        .collect()
}

/// A subject offered for a (department, regulation, semester)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectOption {
    pub id: i32,
    pub code: String,
    pub name: String,
    /// Theory subjects get course feedback, the rest are laboratories
    pub is_theory: bool,
}

impl SubjectOption {
    /// Label used in the staff mapping section, e.g. `Compilers (CS3501)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// A staff member that can be assigned to a subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffOption {
    pub id: Uuid,
    pub name: String,
}

impl From<StaffOption> for OptionItem {
    fn from(staff: StaffOption) -> Self {
        OptionItem::new(staff.id, staff.name)
    }
}
