use super::lookup::staff_display_name;
use crate::entities::{
    alumni_answers, alumni_responses, answers, employer_answers, employer_responses, feedback,
    responses, staff_mappings, staff_profiles, subjects,
};
use log::warn;
use models::{
    answer_sheet::Score,
    feedback_type::FeedbackType,
    report::{QuestionSummary, overall_mean, summarise},
};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Student feedback for one staff member teaching one subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingReport {
    pub staff_mapping_id: i32,
    pub feedback_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub staff_name: String,
    pub responses: usize,
    pub overall: Option<f64>,
    pub questions: Vec<QuestionSummary>,
}

/// A staff member's subjects across feedback cycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffAssignmentOverview {
    pub staff_mapping_id: i32,
    pub feedback_id: i32,
    pub batch: i32,
    pub semester: i32,
    pub section: String,
    pub subject_code: String,
    pub subject_name: String,
    pub responses: usize,
}

pub struct ReportService;

impl ReportService {
    /// Per staff mapping summaries of course (theory) or lab feedback
    pub async fn student_report<C: ConnectionTrait>(
        db: &C,
        feedback_type: FeedbackType,
    ) -> Result<Vec<MappingReport>, DbErr> {
        let is_theory = feedback_type == FeedbackType::Course;
        let subjects: HashMap<i32, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::IsTheory.eq(is_theory))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        if subjects.is_empty() {
            return Ok(vec![]);
        }

        let mappings = staff_mappings::Entity::find()
            .filter(staff_mappings::Column::SubId.is_in(subjects.keys().copied()))
            .order_by_asc(staff_mappings::Column::Id)
            .all(db)
            .await?;

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
        let responses = responses::Entity::find()
            .filter(responses::Column::StaffMappingId.is_in(mapping_ids))
            .all(db)
            .await?;

        let mut response_counts: HashMap<i32, usize> = HashMap::new();
        let mut mapping_by_response: HashMap<i32, i32> = HashMap::new();
        for response in &responses {
            *response_counts.entry(response.staff_mapping_id).or_default() += 1;
            mapping_by_response.insert(response.id, response.staff_mapping_id);
        }

        let answers = if mapping_by_response.is_empty() {
            vec![]
        } else {
            answers::Entity::find()
                .filter(answers::Column::ResponseId.is_in(mapping_by_response.keys().copied()))
                .all(db)
                .await?
        };

        let mut summaries = summarise(answers.into_iter().filter_map(|a| {
            let mapping_id = *mapping_by_response.get(&a.response_id)?;
            Some((mapping_id, a.question_id, valid_score("answer", a.id, a.answer)?))
        }));

        Ok(mappings
            .into_iter()
            .filter_map(|m| {
                let subject = subjects.get(&m.sub_id)?;
                let questions = summaries.remove(&m.id).unwrap_or_default();
                Some(MappingReport {
                    staff_mapping_id: m.id,
                    feedback_id: m.feedback_id,
                    subject_code: subject.code.clone(),
                    subject_name: subject.name.clone(),
                    staff_name: staff_names.get(&m.staff_id).cloned().unwrap_or_default(),
                    responses: response_counts.get(&m.id).copied().unwrap_or_default(),
                    overall: overall_mean(&questions),
                    questions,
                })
            })
            .collect())
    }

    pub async fn alumni_report<C: ConnectionTrait>(db: &C) -> Result<Vec<QuestionSummary>, DbErr> {
        let answers = alumni_answers::Entity::find().all(db).await?;
        let mut report = summarise(answers.into_iter().filter_map(|a| {
            Some(((), a.question_id, valid_score("alumni_answers", a.id, a.answer)?))
        }));
        Ok(report.remove(&()).unwrap_or_default())
    }

    pub async fn employer_report<C: ConnectionTrait>(db: &C) -> Result<Vec<QuestionSummary>, DbErr> {
        let answers = employer_answers::Entity::find().all(db).await?;
        let mut report = summarise(answers.into_iter().filter_map(|a| {
            Some(((), a.question_id, valid_score("employer_answers", a.id, a.answer)?))
        }));
        Ok(report.remove(&()).unwrap_or_default())
    }

    /// Alumni responses, newest first
    pub async fn alumni_responses<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<alumni_responses::Model>, DbErr> {
        alumni_responses::Entity::find()
            .order_by_desc(alumni_responses::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Employer responses, newest first
    pub async fn employer_responses<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<employer_responses::Model>, DbErr> {
        employer_responses::Entity::find()
            .order_by_desc(employer_responses::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Everything a staff member has been mapped to, newest cycle first
    pub async fn staff_overview<C: ConnectionTrait>(
        db: &C,
        staff_id: Uuid,
    ) -> Result<Vec<StaffAssignmentOverview>, DbErr> {
        let mappings = staff_mappings::Entity::find()
            .filter(staff_mappings::Column::StaffId.eq(staff_id))
            .order_by_desc(staff_mappings::Column::FeedbackId)
            .all(db)
            .await?;

        if mappings.is_empty() {
            return Ok(vec![]);
        }

        let cycle_ids: HashSet<i32> = mappings.iter().map(|m| m.feedback_id).collect();
        let cycles: HashMap<i32, feedback::Model> = feedback::Entity::find()
            .filter(feedback::Column::Id.is_in(cycle_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

        let subject_ids: HashSet<i32> = mappings.iter().map(|m| m.sub_id).collect();
        let subjects: HashMap<i32, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mapping_ids: Vec<i32> = mappings.iter().map(|m| m.id).collect();
        let mut response_counts: HashMap<i32, usize> = HashMap::new();
        for response in responses::Entity::find()
            .filter(responses::Column::StaffMappingId.is_in(mapping_ids))
            .all(db)
            .await?
        {
            *response_counts.entry(response.staff_mapping_id).or_default() += 1;
        }

        Ok(mappings
            .into_iter()
            .filter_map(|m| {
                let cycle = cycles.get(&m.feedback_id)?;
                let subject = subjects.get(&m.sub_id)?;
                Some(StaffAssignmentOverview {
                    staff_mapping_id: m.id,
                    feedback_id: cycle.id,
                    batch: cycle.batch,
                    semester: cycle.sem,
                    section: cycle.section.clone(),
                    subject_code: subject.code.clone(),
                    subject_name: subject.name.clone(),
                    responses: response_counts.get(&m.id).copied().unwrap_or_default(),
                })
            })
            .collect())
    }
}

fn valid_score(table: &str, id: i32, answer: i32) -> Option<Score> {
    match Score::try_from(answer) {
        Ok(score) => Some(score),
        Err(_) => {
            warn!("Skipping {table} row {id} with out of range answer {answer}");
            None
        }
    }
}
