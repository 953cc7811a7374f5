use chrono::{DateTime, FixedOffset};
use database::{
    entities::{
        alumni_answers, answers, departments, dept_subjects, employer_responses, feedback,
        responses, staff_mappings, staff_profiles, student_profiles, subjects,
    },
    services::{
        ServiceError,
        feedback::FeedbackService,
        lookup::LookupService,
        report::ReportService,
        student::StudentFeedbackService,
        submission::SubmitError,
    },
};
use models::{
    error::ValidationError,
    feedback_type::FeedbackType,
    options::{OptionItem, StaffOption},
    publish_form::{PublishForm, SubjectQuery},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use uuid::Uuid;

fn timestamp() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-06-01T10:00:00+05:30").unwrap()
}

fn subject(id: i32, code: &str, is_theory: bool) -> subjects::Model {
    subjects::Model {
        id,
        code: code.to_string(),
        name: format!("Subject {code}"),
        short_name: None,
        is_theory,
        category: None,
        reg_id: Some(3),
        created_at: timestamp(),
    }
}

fn student(id: Uuid) -> student_profiles::Model {
    student_profiles::Model {
        id,
        name: Some("Meena".to_string()),
        roll_no: Some(2024001),
        batch: Some(2024),
        dept_id: Some(1),
        section: Some("a".to_string()),
        is_new_user: false,
    }
}

fn cycle(id: i32) -> feedback::Model {
    feedback::Model {
        id,
        batch: 2024,
        department_id: 1,
        regulation_id: 3,
        sem: 5,
        section: "A".to_string(),
        created_at: timestamp(),
    }
}

fn mapping(id: i32, feedback_id: i32, staff_id: Uuid, sub_id: i32) -> staff_mappings::Model {
    staff_mappings::Model {
        id,
        feedback_id,
        staff_id,
        sub_id,
        created_at: timestamp(),
    }
}

fn staff(id: Uuid, name: &str) -> staff_profiles::Model {
    staff_profiles::Model {
        id,
        name: Some(name.to_string()),
        staff_no: None,
        designation: None,
        dept_id: Some(1),
    }
}

fn response(id: i32, staff_mapping_id: i32, student_id: Uuid) -> responses::Model {
    responses::Model {
        id,
        staff_mapping_id,
        student_id,
        created_at: timestamp(),
    }
}

fn publish_form() -> PublishForm {
    let mut form = PublishForm::new();
    form.set_department(OptionItem::new(1, "CS"));
    form.set_regulation(OptionItem::new(3, "2021"));
    let query = form.set_semester(OptionItem::new(5, "5")).unwrap();
    form.load_subjects(
        query,
        vec![
            subject_option(subject(100, "CS3501", true)),
            subject_option(subject(101, "CS3511", false)),
        ],
    );
    form.set_section("a");
    for id in [100, 101] {
        form.assign_staff(
            id,
            StaffOption {
                id: Uuid::new_v4(),
                name: format!("Staff {id}"),
            },
        )
        .unwrap();
    }
    form
}

fn subject_option(model: subjects::Model) -> models::options::SubjectOption {
    models::options::SubjectOption {
        id: model.id,
        code: model.code,
        name: model.name,
        is_theory: model.is_theory,
    }
}

#[tokio::test]
async fn test_department_options() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            departments::Model {
                id: 2,
                name: "Computer Science".to_string(),
                short_name: "CSE".to_string(),
                created_at: timestamp(),
            },
            departments::Model {
                id: 1,
                name: "Electronics".to_string(),
                short_name: "ECE".to_string(),
                created_at: timestamp(),
            },
        ]])
        .into_connection();

    let options = LookupService::department_options(&db).await.unwrap();
    assert_eq!(
        options,
        vec![
            OptionItem::new(2, "Computer Science"),
            OptionItem::new(1, "Electronics"),
        ]
    );
}

#[tokio::test]
async fn test_dept_subjects_follow_selection() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            dept_subjects::Model {
                id: 1,
                dept_id: 1,
                reg_id: 3,
                sem: 5,
                subject_id: 100,
            },
            dept_subjects::Model {
                id: 2,
                dept_id: 1,
                reg_id: 3,
                sem: 5,
                subject_id: 101,
            },
        ]])
        .append_query_results([vec![subject(100, "CS3501", true), subject(101, "CS3511", false)]])
        .into_connection();

    let query = SubjectQuery {
        department_id: 1,
        regulation_id: 3,
        semester: 5,
    };
    let subjects = LookupService::dept_subjects(&db, query).await.unwrap();

    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].label(), "Subject CS3501 (CS3501)");
    assert!(!subjects[1].is_theory);
}

#[tokio::test]
async fn test_dept_subjects_empty_selection_skips_subject_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<dept_subjects::Model>::new()])
        .into_connection();

    let query = SubjectQuery {
        department_id: 9,
        regulation_id: 3,
        semester: 1,
    };
    assert!(LookupService::dept_subjects(&db, query).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_publish_inserts_cycle_and_mappings() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![feedback::Model {
            id: 7,
            batch: 2024,
            department_id: 1,
            regulation_id: 3,
            sem: 5,
            section: "A".to_string(),
            created_at: timestamp(),
        }]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let receipt = FeedbackService::new()
        .submit(&db, &publish_form())
        .await
        .unwrap();

    assert_eq!(receipt.parent_id, 7);
    assert_eq!(receipt.children, 2);
}

#[tokio::test]
async fn test_publish_parent_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("permission denied".to_string())])
        .into_connection();

    let err = FeedbackService::new()
        .submit(&db, &publish_form())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::ParentInsert {
            table: "feedback",
            ..
        }
    ));
}

#[tokio::test]
async fn test_invalid_form_opens_no_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let mut form = publish_form();
    form.set_batch("3024");

    let err = FeedbackService::new().submit(&db, &form).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::InvalidBatch)
    ));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_alumni_report_skips_out_of_range_answers() {
    let answer = |id, question_id, answer| alumni_answers::Model {
        id,
        alumni_res_id: 1,
        question_id,
        answer,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            answer(1, 10, 3),
            answer(2, 10, 2),
            answer(3, 11, 1),
            answer(4, 11, 0),
        ]])
        .into_connection();

    let report = ReportService::alumni_report(&db).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].question_id, 10);
    assert_eq!(report[0].distribution, [0, 1, 1]);
    assert!((report[0].mean - 2.5).abs() < f64::EPSILON);
    assert_eq!(report[1].responses, 1);
}

#[tokio::test]
async fn test_employer_responses_listed() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![employer_responses::Model {
            id: 3,
            employer_name: "Ravi".to_string(),
            company: "Acme".to_string(),
            created_at: timestamp(),
        }]])
        .into_connection();

    let responses = ReportService::employer_responses(&db).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].company, "Acme");
}

#[tokio::test]
async fn test_feedback_list_keeps_course_subjects_and_flags_answered() {
    let student_id = Uuid::new_v4();
    let ada = Uuid::new_v4();
    let grace = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cycle(7)]])
        .append_query_results([vec![
            mapping(20, 7, ada, 100),
            mapping(21, 7, grace, 101),
            mapping(22, 7, grace, 102),
        ]])
        .append_query_results([vec![
            subject(100, "CS3501", true),
            subject(101, "CS3511", false),
            subject(102, "CS3502", true),
        ]])
        .append_query_results([vec![staff(ada, "Ada"), staff(grace, "Grace")]])
        .append_query_results([vec![response(1, 20, student_id)]])
        .into_connection();

    let profile = student(student_id);
    let items = StudentFeedbackService::feedback_list(&db, &profile, FeedbackType::Course)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].staff_mapping_id, 20);
    assert_eq!(items[0].subject_code, "CS3501");
    assert_eq!(items[0].staff_name, "Ada");
    assert!(items[0].answered);
    assert_eq!(items[1].staff_mapping_id, 22);
    assert_eq!(items[1].staff_name, "Grace");
    assert!(!items[1].answered);
}

#[tokio::test]
async fn test_feedback_list_without_cycle_is_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<feedback::Model>::new()])
        .into_connection();

    let profile = student(Uuid::new_v4());
    let items = StudentFeedbackService::feedback_list(&db, &profile, FeedbackType::Lab)
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_feedback_target_for_lab_subject() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cycle(7)]])
        .append_query_results([vec![(
            mapping(21, 7, Uuid::new_v4(), 101),
            subject(101, "CS3511", false),
        )]])
        .append_query_results([Vec::<responses::Model>::new()])
        .into_connection();

    let target = StudentFeedbackService::feedback_target(&db, &student(Uuid::new_v4()), 21)
        .await
        .unwrap();

    assert_eq!(target.staff_mapping_id, 21);
    assert_eq!(target.feedback_type, FeedbackType::Lab);
}

#[tokio::test]
async fn test_feedback_target_already_answered_is_conflict() {
    let student_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cycle(7)]])
        .append_query_results([vec![(
            mapping(20, 7, Uuid::new_v4(), 100),
            subject(100, "CS3501", true),
        )]])
        .append_query_results([vec![response(1, 20, student_id)]])
        .into_connection();

    let err = StudentFeedbackService::feedback_target(&db, &student(student_id), 20)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict("feedback already submitted")));
}

#[tokio::test]
async fn test_feedback_target_from_other_cycle_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cycle(7)]])
        .append_query_results([vec![(
            mapping(20, 6, Uuid::new_v4(), 100),
            subject(100, "CS3501", true),
        )]])
        .into_connection();

    let err = StudentFeedbackService::feedback_target(&db, &student(Uuid::new_v4()), 20)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound("staff mapping")));
}

#[tokio::test]
async fn test_feedback_target_without_cycle_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<feedback::Model>::new()])
        .into_connection();

    let err = StudentFeedbackService::feedback_target(&db, &student(Uuid::new_v4()), 20)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound("feedback cycle")));
}

#[tokio::test]
async fn test_student_report_groups_answers_by_mapping() {
    let ada = Uuid::new_v4();
    let grace = Uuid::new_v4();
    let answer = |id, response_id, question_id, answer| answers::Model {
        id,
        response_id,
        question_id,
        answer,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![subject(100, "CS3501", true)]])
        .append_query_results([vec![mapping(20, 7, ada, 100), mapping(23, 8, grace, 100)]])
        .append_query_results([vec![staff(ada, "Ada"), staff(grace, "Grace")]])
        .append_query_results([vec![
            response(1, 20, Uuid::new_v4()),
            response(2, 20, Uuid::new_v4()),
        ]])
        .append_query_results([vec![
            answer(1, 1, 1, 3),
            answer(2, 2, 1, 1),
            answer(3, 1, 2, 2),
        ]])
        .into_connection();

    let report = ReportService::student_report(&db, FeedbackType::Course)
        .await
        .unwrap();

    assert_eq!(report.len(), 2);
    let answered = &report[0];
    assert_eq!(answered.staff_mapping_id, 20);
    assert_eq!(answered.staff_name, "Ada");
    assert_eq!(answered.responses, 2);
    assert_eq!(answered.questions.len(), 2);
    assert_eq!(answered.questions[0].distribution, [1, 0, 1]);
    assert_eq!(answered.overall, Some(2.0));

    let unanswered = &report[1];
    assert_eq!(unanswered.staff_mapping_id, 23);
    assert_eq!(unanswered.feedback_id, 8);
    assert_eq!(unanswered.responses, 0);
    assert!(unanswered.questions.is_empty());
    assert_eq!(unanswered.overall, None);
}

#[tokio::test]
async fn test_staff_overview_counts_responses_per_mapping() {
    let ada = Uuid::new_v4();
    let mut later = cycle(8);
    later.sem = 6;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![mapping(30, 8, ada, 101), mapping(20, 7, ada, 100)]])
        .append_query_results([vec![cycle(7), later]])
        .append_query_results([vec![subject(100, "CS3501", true), subject(101, "CS3511", false)]])
        .append_query_results([vec![
            response(1, 20, Uuid::new_v4()),
            response(2, 20, Uuid::new_v4()),
            response(3, 30, Uuid::new_v4()),
        ]])
        .into_connection();

    let rows = ReportService::staff_overview(&db, ada).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].staff_mapping_id, 30);
    assert_eq!(rows[0].semester, 6);
    assert_eq!(rows[0].subject_code, "CS3511");
    assert_eq!(rows[0].responses, 1);
    assert_eq!(rows[1].feedback_id, 7);
    assert_eq!(rows[1].section, "A");
    assert_eq!(rows[1].responses, 2);
}
