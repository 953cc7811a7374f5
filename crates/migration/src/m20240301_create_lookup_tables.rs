use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::ShortName).string().not_null())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create regulations table
        manager
            .create_table(
                Table::create()
                    .table(Regulations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Regulations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Regulations::Reg).integer().not_null())
                    .col(
                        ColumnDef::new(Regulations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subject table
        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Code).string().not_null())
                    .col(ColumnDef::new(Subject::Name).string().not_null())
                    .col(ColumnDef::new(Subject::ShortName).string())
                    .col(
                        ColumnDef::new(Subject::IsTheory)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Subject::Category).string())
                    .col(ColumnDef::new(Subject::RegId).integer())
                    .col(
                        ColumnDef::new(Subject::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subject-reg_id")
                            .from(Subject::Table, Subject::RegId)
                            .to(Regulations::Table, Regulations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create dept_subject junction table (subject offered to a department in a semester)
        manager
            .create_table(
                Table::create()
                    .table(DeptSubject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeptSubject::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeptSubject::DeptId).integer().not_null())
                    .col(ColumnDef::new(DeptSubject::RegId).integer().not_null())
                    .col(ColumnDef::new(DeptSubject::Sem).integer().not_null())
                    .col(ColumnDef::new(DeptSubject::SubjectId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-dept_subject-dept_id")
                            .from(DeptSubject::Table, DeptSubject::DeptId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-dept_subject-reg_id")
                            .from(DeptSubject::Table, DeptSubject::RegId)
                            .to(Regulations::Table, Regulations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-dept_subject-subject_id")
                            .from(DeptSubject::Table, DeptSubject::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create staff_profile table
        manager
            .create_table(
                Table::create()
                    .table(StaffProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffProfile::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffProfile::Name).string())
                    .col(ColumnDef::new(StaffProfile::StaffNo).string())
                    .col(ColumnDef::new(StaffProfile::Designation).string())
                    .col(ColumnDef::new(StaffProfile::DeptId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-staff_profile-dept_id")
                            .from(StaffProfile::Table, StaffProfile::DeptId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student_profile table
        manager
            .create_table(
                Table::create()
                    .table(StudentProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfile::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentProfile::Name).string())
                    .col(ColumnDef::new(StudentProfile::RollNo).big_integer())
                    .col(ColumnDef::new(StudentProfile::Batch).integer())
                    .col(ColumnDef::new(StudentProfile::DeptId).integer())
                    .col(ColumnDef::new(StudentProfile::Section).string())
                    .col(
                        ColumnDef::new(StudentProfile::IsNewUser)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_profile-dept_id")
                            .from(StudentProfile::Table, StudentProfile::DeptId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create question table
        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Question::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Question::FeedbackType).text().not_null())
                    .col(ColumnDef::new(Question::QuestionNo).integer().not_null())
                    .col(ColumnDef::new(Question::Question).text().not_null())
                    .col(ColumnDef::new(Question::NoOfOptions).integer())
                    .to_owned(),
            )
            .await?;

        // Create question_options table
        manager
            .create_table(
                Table::create()
                    .table(QuestionOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionOptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::QuestionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionOptions::Option).string().not_null())
                    .col(ColumnDef::new(QuestionOptions::Value).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-question_options-question_id")
                            .from(QuestionOptions::Table, QuestionOptions::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of creation to respect foreign key constraints
        manager
            .drop_table(Table::drop().table(QuestionOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Question::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffProfile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeptSubject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Regulations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Departments {
    Table,
    Id,
    Name,
    ShortName,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Regulations {
    Table,
    Id,
    Reg,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Subject {
    Table,
    Id,
    Code,
    Name,
    ShortName,
    IsTheory,
    Category,
    RegId,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum DeptSubject {
    Table,
    Id,
    DeptId,
    RegId,
    Sem,
    SubjectId,
}

#[derive(Iden)]
pub(crate) enum StaffProfile {
    Table,
    Id,
    Name,
    StaffNo,
    Designation,
    DeptId,
}

#[derive(Iden)]
pub(crate) enum StudentProfile {
    Table,
    Id,
    Name,
    RollNo,
    Batch,
    DeptId,
    Section,
    IsNewUser,
}

#[derive(Iden)]
pub(crate) enum Question {
    Table,
    Id,
    FeedbackType,
    QuestionNo,
    Question,
    NoOfOptions,
}

#[derive(Iden)]
pub(crate) enum QuestionOptions {
    Table,
    Id,
    QuestionId,
    Option,
    Value,
}
