use crate::entities::{
    alumni_answers, alumni_responses, answers, employer_answers, employer_responses, feedback,
    responses, staff_mappings,
};
use async_trait::async_trait;
use log::debug;
use models::submission::{ChildRecord, ParentRecord};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DbErr, EntityTrait};

/// The writes a dependent submission needs from the backend
///
/// `insert_parent` resolves to the generated id of the new row, which is what
/// the children are built with.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert_parent(&self, parent: ParentRecord) -> Result<i32, DbErr>;

    /// Batch-inserts the children, returning the number of rows written
    async fn insert_children(&self, children: Vec<ChildRecord>) -> Result<u64, DbErr>;
}

/// [`FeedbackStore`] over any sea-orm connection or transaction
pub struct SeaStore<'c, C>(pub &'c C);

#[async_trait]
impl<C> FeedbackStore for SeaStore<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn insert_parent(&self, parent: ParentRecord) -> Result<i32, DbErr> {
        let db = self.0;
        let table = parent.table();

        let id = match parent {
            ParentRecord::FeedbackCycle(cycle) => {
                feedback::ActiveModel {
                    batch: Set(cycle.batch),
                    department_id: Set(cycle.department_id),
                    regulation_id: Set(cycle.regulation_id),
                    sem: Set(cycle.semester),
                    section: Set(cycle.section),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
            ParentRecord::AlumniResponse(response) => {
                alumni_responses::ActiveModel {
                    alumni_name: Set(response.alumni_name),
                    batch: Set(response.batch),
                    dept_id: Set(response.department_id),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
            ParentRecord::EmployerResponse(response) => {
                employer_responses::ActiveModel {
                    employer_name: Set(response.employer_name),
                    company: Set(response.company),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
            ParentRecord::StudentResponse(response) => {
                responses::ActiveModel {
                    staff_mapping_id: Set(response.staff_mapping_id),
                    student_id: Set(response.student_id),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
        };

        debug!("Inserted {table} row {id}");
        Ok(id)
    }

    async fn insert_children(&self, children: Vec<ChildRecord>) -> Result<u64, DbErr> {
        let db = self.0;

        // Group by table so each kind goes out as a single multi-row insert
        let mut assignments = Vec::new();
        let mut alumni = Vec::new();
        let mut employer = Vec::new();
        let mut student = Vec::new();

        for child in children {
            match child {
                ChildRecord::StaffAssignment {
                    feedback_id,
                    staff_id,
                    subject_id,
                } => assignments.push(staff_mappings::ActiveModel {
                    feedback_id: Set(feedback_id),
                    staff_id: Set(staff_id),
                    sub_id: Set(subject_id),
                    ..Default::default()
                }),
                ChildRecord::AlumniAnswer {
                    alumni_response_id,
                    question_id,
                    score,
                } => alumni.push(alumni_answers::ActiveModel {
                    alumni_res_id: Set(alumni_response_id),
                    question_id: Set(question_id),
                    answer: Set(score.into()),
                    ..Default::default()
                }),
                ChildRecord::EmployerAnswer {
                    employer_response_id,
                    question_id,
                    score,
                } => employer.push(employer_answers::ActiveModel {
                    employer_res_id: Set(employer_response_id),
                    question_id: Set(question_id),
                    answer: Set(score.into()),
                    ..Default::default()
                }),
                ChildRecord::StudentAnswer {
                    response_id,
                    question_id,
                    score,
                } => student.push(answers::ActiveModel {
                    response_id: Set(response_id),
                    question_id: Set(question_id),
                    answer: Set(score.into()),
                    ..Default::default()
                }),
            }
        }

        let mut inserted = 0;
        if !assignments.is_empty() {
            inserted += staff_mappings::Entity::insert_many(assignments)
                .exec_without_returning(db)
                .await?;
        }
        if !alumni.is_empty() {
            inserted += alumni_answers::Entity::insert_many(alumni)
                .exec_without_returning(db)
                .await?;
        }
        if !employer.is_empty() {
            inserted += employer_answers::Entity::insert_many(employer)
                .exec_without_returning(db)
                .await?;
        }
        if !student.is_empty() {
            inserted += answers::Entity::insert_many(student)
                .exec_without_returning(db)
                .await?;
        }

        debug!("Inserted {inserted} child rows");
        Ok(inserted)
    }
}
