use crate::{
    error::ValidationError,
    options::{StaffOption, SubjectOption},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Assignment of staff to the subjects of a feedback cycle, keyed by subject id
///
/// A fresh mapping has one unset entry per subject. It only ever holds the keys
/// it was built with; there is no merging across subject sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaffMapping {
    entries: BTreeMap<i32, Option<StaffOption>>,
}

impl StaffMapping {
    /// Builds a skeleton with every subject unassigned
    pub fn skeleton<'a>(subjects: impl IntoIterator<Item = &'a SubjectOption>) -> Self {
        Self {
            entries: subjects.into_iter().map(|s| (s.id, None)).collect(),
        }
    }

    pub fn assign(&mut self, subject_id: i32, staff: StaffOption) -> Result<(), ValidationError> {
        let entry = self
            .entries
            .get_mut(&subject_id)
            .ok_or(ValidationError::UnknownSubject(subject_id))?;
        *entry = Some(staff);
        Ok(())
    }

    pub fn clear(&mut self, subject_id: i32) {
        if let Some(entry) = self.entries.get_mut(&subject_id) {
            *entry = None;
        }
    }

    pub fn get(&self, subject_id: i32) -> Option<&StaffOption> {
        self.entries.get(&subject_id).and_then(Option::as_ref)
    }

    /// True when there is at least one subject and every subject has staff
    pub fn is_complete(&self) -> bool {
        !self.entries.is_empty() && self.entries.values().all(Option::is_some)
    }

    pub fn unassigned(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries
            .iter()
            .filter(|(_, staff)| staff.is_none())
            .map(|(&id, _)| id)
    }

    /// Completed `(subject_id, staff)` pairs, or `None` while any entry is unset
    pub fn assignments(&self) -> Option<Vec<(i32, &StaffOption)>> {
        if !self.is_complete() {
            return None;
        }

        self.entries
            .iter()
            .map(|(&id, staff)| staff.as_ref().map(|s| (id, s)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
