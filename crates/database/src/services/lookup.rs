use crate::entities::{
    departments, dept_subjects, question_options, questions, regulations, staff_profiles, subjects,
};
use models::{
    feedback_type::QuestionCategory,
    options::{OptionItem, StaffOption, SubjectOption},
    publish_form::SubjectQuery,
};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

/// A question with its answer options, ordered by option value
pub type QuestionWithOptions = (questions::Model, Vec<question_options::Model>);

pub struct LookupService;

impl LookupService {
    pub async fn department_options<C: ConnectionTrait>(db: &C) -> Result<Vec<OptionItem>, DbErr> {
        let departments = departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(db)
            .await?;

        Ok(departments
            .into_iter()
            .map(|d| OptionItem::new(d.id, d.name))
            .collect())
    }

    pub async fn regulation_options<C: ConnectionTrait>(db: &C) -> Result<Vec<OptionItem>, DbErr> {
        // Newest regulation first
        let regulations = regulations::Entity::find()
            .order_by_desc(regulations::Column::Reg)
            .all(db)
            .await?;

        Ok(regulations
            .into_iter()
            .map(|r| OptionItem::new(r.id, r.reg.to_string()))
            .collect())
    }

    pub async fn staff_options<C: ConnectionTrait>(db: &C) -> Result<Vec<StaffOption>, DbErr> {
        let staff = staff_profiles::Entity::find()
            .order_by_asc(staff_profiles::Column::Name)
            .all(db)
            .await?;

        Ok(staff
            .into_iter()
            .map(|s| StaffOption {
                id: s.id,
                name: staff_display_name(&s),
            })
            .collect())
    }

    /// Subjects taught to a department in one semester of a regulation, by code
    pub async fn dept_subjects<C: ConnectionTrait>(
        db: &C,
        query: SubjectQuery,
    ) -> Result<Vec<SubjectOption>, DbErr> {
        let subject_ids: Vec<i32> = dept_subjects::Entity::find()
            .filter(dept_subjects::Column::DeptId.eq(query.department_id))
            .filter(dept_subjects::Column::RegId.eq(query.regulation_id))
            .filter(dept_subjects::Column::Sem.eq(query.semester))
            .all(db)
            .await?
            .into_iter()
            .map(|ds| ds.subject_id)
            .collect();

        if subject_ids.is_empty() {
            return Ok(vec![]);
        }

        let subjects = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .order_by_asc(subjects::Column::Code)
            .all(db)
            .await?;

        Ok(subjects.into_iter().map(subject_option).collect())
    }

    /// Questions of the given categories, in category then question number order
    pub async fn questions<C: ConnectionTrait>(
        db: &C,
        categories: &[QuestionCategory],
    ) -> Result<Vec<QuestionWithOptions>, DbErr> {
        let mut questions = questions::Entity::find()
            .filter(questions::Column::FeedbackType.is_in(categories.iter().copied()))
            .order_by_asc(questions::Column::QuestionNo)
            .all(db)
            .await?;

        if questions.is_empty() {
            return Ok(vec![]);
        }

        questions.sort_by_key(|q| {
            let rank = categories.iter().position(|c| *c == q.feedback_type);
            (rank, q.question_no)
        });

        let question_ids: Vec<i32> = questions.iter().map(|q| q.id).collect();
        let options = question_options::Entity::find()
            .filter(question_options::Column::QuestionId.is_in(question_ids))
            .order_by_asc(question_options::Column::Value)
            .all(db)
            .await?;

        let mut options_by_question: HashMap<i32, Vec<question_options::Model>> = HashMap::new();
        for option in options {
            options_by_question
                .entry(option.question_id)
                .or_default()
                .push(option);
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let options = options_by_question.remove(&q.id).unwrap_or_default();
                (q, options)
            })
            .collect())
    }

    /// Ids of the questions a questionnaire consists of
    pub async fn question_ids<C: ConnectionTrait>(
        db: &C,
        categories: &[QuestionCategory],
    ) -> Result<Vec<i32>, DbErr> {
        let questions = questions::Entity::find()
            .filter(questions::Column::FeedbackType.is_in(categories.iter().copied()))
            .all(db)
            .await?;

        Ok(questions.into_iter().map(|q| q.id).collect())
    }
}

pub(crate) fn subject_option(subject: subjects::Model) -> SubjectOption {
    SubjectOption {
        id: subject.id,
        code: subject.code,
        name: subject.name,
        is_theory: subject.is_theory,
    }
}

pub(crate) fn staff_display_name(staff: &staff_profiles::Model) -> String {
    staff
        .name
        .clone()
        .or_else(|| staff.staff_no.clone())
        .unwrap_or_else(|| staff.id.to_string())
}
