use sea_orm_migration::prelude::*;

use crate::m20240301_create_lookup_tables::{
    Departments, Question, Regulations, StaffProfile, StudentProfile, Subject,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create feedback table (one row per published cycle)
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::Batch).integer().not_null())
                    .col(ColumnDef::new(Feedback::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Feedback::RegulationId).integer().not_null())
                    .col(ColumnDef::new(Feedback::Sem).integer().not_null())
                    .col(ColumnDef::new(Feedback::Section).string().not_null())
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-feedback-department_id")
                            .from(Feedback::Table, Feedback::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-feedback-regulation_id")
                            .from(Feedback::Table, Feedback::RegulationId)
                            .to(Regulations::Table, Regulations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create staff_mapping table
        manager
            .create_table(
                Table::create()
                    .table(StaffMapping::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffMapping::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffMapping::FeedbackId).integer().not_null())
                    .col(ColumnDef::new(StaffMapping::StaffId).uuid().not_null())
                    .col(ColumnDef::new(StaffMapping::SubId).integer().not_null())
                    .col(
                        ColumnDef::new(StaffMapping::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-staff_mapping-feedback_id")
                            .from(StaffMapping::Table, StaffMapping::FeedbackId)
                            .to(Feedback::Table, Feedback::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-staff_mapping-staff_id")
                            .from(StaffMapping::Table, StaffMapping::StaffId)
                            .to(StaffProfile::Table, StaffProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-staff_mapping-sub_id")
                            .from(StaffMapping::Table, StaffMapping::SubId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create response table (one row per student per staff mapping)
        manager
            .create_table(
                Table::create()
                    .table(Response::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Response::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Response::StaffMappingId).integer().not_null())
                    .col(ColumnDef::new(Response::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(Response::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-response-staff_mapping_id")
                            .from(Response::Table, Response::StaffMappingId)
                            .to(StaffMapping::Table, StaffMapping::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-response-student_id")
                            .from(Response::Table, Response::StudentId)
                            .to(StudentProfile::Table, StudentProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create answer table
        manager
            .create_table(
                Table::create()
                    .table(Answer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Answer::ResponseId).integer().not_null())
                    .col(ColumnDef::new(Answer::QuestionId).integer().not_null())
                    .col(ColumnDef::new(Answer::Answer).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-answer-response_id")
                            .from(Answer::Table, Answer::ResponseId)
                            .to(Response::Table, Response::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-answer-question_id")
                            .from(Answer::Table, Answer::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create alumni_response table
        manager
            .create_table(
                Table::create()
                    .table(AlumniResponse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlumniResponse::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AlumniResponse::AlumniName).string().not_null())
                    .col(ColumnDef::new(AlumniResponse::Batch).string().not_null())
                    .col(ColumnDef::new(AlumniResponse::DeptId).integer().not_null())
                    .col(
                        ColumnDef::new(AlumniResponse::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-alumni_response-dept_id")
                            .from(AlumniResponse::Table, AlumniResponse::DeptId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create alumni_answers table
        manager
            .create_table(
                Table::create()
                    .table(AlumniAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlumniAnswers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AlumniAnswers::AlumniResId).integer().not_null())
                    .col(ColumnDef::new(AlumniAnswers::QuestionId).integer().not_null())
                    .col(ColumnDef::new(AlumniAnswers::Answer).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-alumni_answers-alumni_res_id")
                            .from(AlumniAnswers::Table, AlumniAnswers::AlumniResId)
                            .to(AlumniResponse::Table, AlumniResponse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-alumni_answers-question_id")
                            .from(AlumniAnswers::Table, AlumniAnswers::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employer_response table
        manager
            .create_table(
                Table::create()
                    .table(EmployerResponse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployerResponse::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployerResponse::EmployerName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployerResponse::Company).string().not_null())
                    .col(
                        ColumnDef::new(EmployerResponse::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employer_answers table
        manager
            .create_table(
                Table::create()
                    .table(EmployerAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployerAnswers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployerAnswers::EmployerResId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployerAnswers::QuestionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployerAnswers::Answer).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employer_answers-employer_res_id")
                            .from(EmployerAnswers::Table, EmployerAnswers::EmployerResId)
                            .to(EmployerResponse::Table, EmployerResponse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employer_answers-question_id")
                            .from(EmployerAnswers::Table, EmployerAnswers::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first, then their parents
        manager
            .drop_table(Table::drop().table(EmployerAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployerResponse::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AlumniAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AlumniResponse::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Response::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffMapping::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Feedback {
    Table,
    Id,
    Batch,
    DepartmentId,
    RegulationId,
    Sem,
    Section,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum StaffMapping {
    Table,
    Id,
    FeedbackId,
    StaffId,
    SubId,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Response {
    Table,
    Id,
    StaffMappingId,
    StudentId,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Answer {
    Table,
    Id,
    ResponseId,
    QuestionId,
    Answer,
}

#[derive(Iden)]
enum AlumniResponse {
    Table,
    Id,
    AlumniName,
    Batch,
    DeptId,
    CreatedAt,
}

#[derive(Iden)]
enum AlumniAnswers {
    Table,
    Id,
    AlumniResId,
    QuestionId,
    Answer,
}

#[derive(Iden)]
enum EmployerResponse {
    Table,
    Id,
    EmployerName,
    Company,
    CreatedAt,
}

#[derive(Iden)]
enum EmployerAnswers {
    Table,
    Id,
    EmployerResId,
    QuestionId,
    Answer,
}
