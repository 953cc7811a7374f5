use sea_orm_migration::prelude::*;

use crate::m20240301_create_lookup_tables::DeptSubject;
use crate::m20240302_create_feedback_tables::{Answer, Feedback, Response, StaffMapping};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dependent subject lookup filters on all three columns
        manager
            .create_index(
                Index::create()
                    .name("idx_dept_subject_dept_reg_sem")
                    .table(DeptSubject::Table)
                    .col(DeptSubject::DeptId)
                    .col(DeptSubject::RegId)
                    .col(DeptSubject::Sem)
                    .to_owned(),
            )
            .await?;

        // Student feedback list picks the latest cycle for a cohort
        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_batch_department_section")
                    .table(Feedback::Table)
                    .col(Feedback::Batch)
                    .col(Feedback::DepartmentId)
                    .col(Feedback::Section)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_mapping_feedback_id")
                    .table(StaffMapping::Table)
                    .col(StaffMapping::FeedbackId)
                    .to_owned(),
            )
            .await?;

        // A student answers each staff mapping at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_response_staff_mapping_student")
                    .table(Response::Table)
                    .col(Response::StaffMappingId)
                    .col(Response::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_answer_response_id")
                    .table(Answer::Table)
                    .col(Answer::ResponseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_answer_response_id",
            "idx_response_staff_mapping_student",
            "idx_staff_mapping_feedback_id",
            "idx_feedback_batch_department_section",
            "idx_dept_subject_dept_reg_sem",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
