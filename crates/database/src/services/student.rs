use super::{
    ServiceError,
    lookup::{staff_display_name, subject_option},
};
use crate::entities::{feedback, responses, staff_mappings, staff_profiles, student_profiles, subjects};
use models::feedback_type::FeedbackType;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A subject the student can (or already did) give feedback on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackListItem {
    pub staff_mapping_id: i32,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub staff_name: String,
    /// Feedback was already submitted, so the entry is disabled
    pub answered: bool,
}

/// Where a student's feedback on one staff mapping should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTarget {
    pub staff_mapping_id: i32,
    pub feedback_type: FeedbackType,
}

pub struct StudentFeedbackService;

impl StudentFeedbackService {
    pub async fn profile<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
    ) -> Result<student_profiles::Model, ServiceError> {
        student_profiles::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("student profile"))
    }

    /// The most recent feedback cycle published for the student's class
    pub async fn current_cycle<C: ConnectionTrait>(
        db: &C,
        profile: &student_profiles::Model,
    ) -> Result<Option<feedback::Model>, DbErr> {
        let (Some(batch), Some(dept_id), Some(section)) =
            (profile.batch, profile.dept_id, profile.section.as_deref())
        else {
            return Ok(None);
        };

        feedback::Entity::find()
            .filter(feedback::Column::Batch.eq(batch))
            .filter(feedback::Column::DepartmentId.eq(dept_id))
            .filter(feedback::Column::Section.eq(section.to_uppercase()))
            .order_by_desc(feedback::Column::CreatedAt)
            .one(db)
            .await
    }

    /// Subjects of the current cycle matching `feedback_type`, flagged if already answered
    pub async fn feedback_list<C: ConnectionTrait>(
        db: &C,
        profile: &student_profiles::Model,
        feedback_type: FeedbackType,
    ) -> Result<Vec<FeedbackListItem>, DbErr> {
        let Some(cycle) = Self::current_cycle(db, profile).await? else {
            return Ok(vec![]);
        };

        let mappings = staff_mappings::Entity::find()
            .filter(staff_mappings::Column::FeedbackId.eq(cycle.id))
            .order_by_asc(staff_mappings::Column::Id)
            .all(db)
            .await?;

        if mappings.is_empty() {
            return Ok(vec![]);
        }

        let subject_ids: HashSet<i32> = mappings.iter().map(|m| m.sub_id).collect();
        let subjects: HashMap<i32, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(db)
            .await?
            .into_iter()
            .filter(|s| feedback_type.matches_subject(s.is_theory))
            .map(|s| (s.id, s))
            .collect();

        let mappings: Vec<staff_mappings::Model> = mappings
            .into_iter()
            .filter(|m| subjects.contains_key(&m.sub_id))
            .collect();

        if mappings.is_empty() {
            return Ok(vec![]);
        }

        let staff_ids: HashSet<Uuid> = mappings.iter().map(|m| m.staff_id).collect();
        let staff_names: HashMap<Uuid, String> = staff_profiles::Entity::find()
            .filter(staff_profiles::Column::Id.is_in(staff_ids))
            .all(db)
            .await?
            .iter()
            .map(|s| (s.id, staff_display_name(s)))
            .collect();

        let mapping_ids: Vec<i32> = mappings.iter().map(|m| m.id).collect();
        let answered: HashSet<i32> = responses::Entity::find()
            .filter(responses::Column::StaffMappingId.is_in(mapping_ids))
            .filter(responses::Column::StudentId.eq(profile.id))
            .all(db)
            .await?
            .into_iter()
            .map(|r| r.staff_mapping_id)
            .collect();

        let items = mappings
            .into_iter()
            .filter_map(|m| {
                let subject = subject_option(subjects.get(&m.sub_id)?.clone());
                Some(FeedbackListItem {
                    staff_mapping_id: m.id,
                    subject_id: subject.id,
                    subject_code: subject.code,
                    subject_name: subject.name,
                    staff_name: staff_names.get(&m.staff_id).cloned().unwrap_or_default(),
                    answered: answered.contains(&m.id),
                })
            })
            .collect();

        Ok(items)
    }

    /// Checks that the student may answer `staff_mapping_id` and which questionnaire applies
    pub async fn feedback_target<C: ConnectionTrait>(
        db: &C,
        profile: &student_profiles::Model,
        staff_mapping_id: i32,
    ) -> Result<FeedbackTarget, ServiceError> {
        let cycle = Self::current_cycle(db, profile)
            .await?
            .ok_or(ServiceError::NotFound("feedback cycle"))?;

        let (mapping, subject) = match staff_mappings::Entity::find_by_id(staff_mapping_id)
            .find_also_related(subjects::Entity)
            .one(db)
            .await?
        {
            Some((mapping, Some(subject))) if mapping.feedback_id == cycle.id => (mapping, subject),
            _ => return Err(ServiceError::NotFound("staff mapping")),
        };

        let existing = responses::Entity::find()
            .filter(responses::Column::StaffMappingId.eq(mapping.id))
            .filter(responses::Column::StudentId.eq(profile.id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict("feedback already submitted"));
        }

        Ok(FeedbackTarget {
            staff_mapping_id: mapping.id,
            feedback_type: FeedbackType::for_subject(subject.is_theory),
        })
    }
}
