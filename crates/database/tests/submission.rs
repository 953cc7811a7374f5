use async_trait::async_trait;
use database::{
    services::submission::{SubmissionOrchestrator, SubmitError},
    store::FeedbackStore,
};
use models::{
    answer_sheet::AnswerSheet,
    error::ValidationError,
    options::{OptionItem, StaffOption, SubjectOption},
    publish_form::PublishForm,
    submission::{
        AlumniFeedbackForm, ChildRecord, DependentSubmission, FeedbackForm, NewFeedbackCycle,
        ParentRecord,
    },
};
use sea_orm::DbErr;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Parent(ParentRecord),
    Children(Vec<ChildRecord>),
}

/// Records every store call in order and fails on demand
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    fail_parent: bool,
    fail_children: bool,
}

impl RecordingStore {
    const PARENT_ID: i32 = 42;

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackStore for RecordingStore {
    async fn insert_parent(&self, parent: ParentRecord) -> Result<i32, DbErr> {
        self.calls.lock().unwrap().push(Call::Parent(parent));
        if self.fail_parent {
            return Err(DbErr::Custom("insert rejected".to_string()));
        }
        Ok(Self::PARENT_ID)
    }

    async fn insert_children(&self, children: Vec<ChildRecord>) -> Result<u64, DbErr> {
        let count = children.len() as u64;
        self.calls.lock().unwrap().push(Call::Children(children));
        if self.fail_children {
            return Err(DbErr::Custom("children rejected".to_string()));
        }
        Ok(count)
    }
}

fn staff(name: &str) -> StaffOption {
    StaffOption {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

fn cs_publish_form() -> PublishForm {
    let mut form = PublishForm::new();
    form.set_batch("2024");
    form.set_department(OptionItem::new(1, "CS"));
    form.set_regulation(OptionItem::new(3, "2021"));
    let query = form.set_semester(OptionItem::new(5, "5")).unwrap();
    form.load_subjects(
        query,
        vec![
            SubjectOption {
                id: 100,
                code: "CS3501".to_string(),
                name: "Compilers".to_string(),
                is_theory: true,
            },
            SubjectOption {
                id: 101,
                code: "CS3511".to_string(),
                name: "Compilers Lab".to_string(),
                is_theory: false,
            },
        ],
    );
    form.set_section("a");
    form
}

fn answered_alumni_form() -> AlumniFeedbackForm {
    let mut answers = AnswerSheet::for_questions([1, 2, 3]);
    answers.answer_all([(1, 3), (2, 2), (3, 1)]).unwrap();
    AlumniFeedbackForm {
        alumni_name: "Priya".to_string(),
        batch: "2018".to_string(),
        department: OptionItem::new(1, "CS"),
        answers,
    }
}

#[tokio::test]
async fn test_publish_writes_parent_then_children() {
    let store = RecordingStore::default();
    let mut form = cs_publish_form();
    form.assign_staff(100, staff("Ada")).unwrap();
    form.assign_staff(101, staff("Grace")).unwrap();

    let receipt = SubmissionOrchestrator::new()
        .submit(&store, &form)
        .await
        .unwrap();

    assert_eq!(receipt.parent_id, RecordingStore::PARENT_ID);
    assert_eq!(receipt.children, 2);
    assert_eq!(receipt.confirmation.message, "Feedback Published Successfully");
    assert_eq!(
        receipt.confirmation.navigate_to.as_deref(),
        Some("/admin/dashboard")
    );

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        Call::Parent(ParentRecord::FeedbackCycle(NewFeedbackCycle {
            batch: 2024,
            department_id: 1,
            regulation_id: 3,
            semester: 5,
            section: "A".to_string(),
        }))
    );
    match &calls[1] {
        Call::Children(children) => {
            assert_eq!(children.len(), 2);
            assert!(
                children
                    .iter()
                    .all(|c| c.parent_id() == RecordingStore::PARENT_ID)
            );
        }
        other => panic!("expected children, got {other:?}"),
    }
}

#[tokio::test]
async fn test_parent_failure_sends_no_children() {
    let store = RecordingStore {
        fail_parent: true,
        ..Default::default()
    };

    let err = SubmissionOrchestrator::new()
        .submit(&store, &answered_alumni_form())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::ParentInsert {
            table: "alumni_response",
            ..
        }
    ));
    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Parent(_)));
}

#[tokio::test]
async fn test_validation_failure_never_reaches_store() {
    let store = RecordingStore::default();
    let mut form = answered_alumni_form();
    form.batch = "20".to_string();

    let err = SubmissionOrchestrator::new()
        .submit(&store, &form)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::InvalidBatch)
    ));
    assert_eq!(err.to_string(), "Please Enter a Valid Batch");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_incomplete_mapping_never_reaches_store() {
    let store = RecordingStore::default();
    let mut form = cs_publish_form();
    form.assign_staff(100, staff("Ada")).unwrap();
    assert!(form.is_publish_disabled());

    let err = SubmissionOrchestrator::new()
        .submit(&store, &form)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::IncompleteStaffMapping)
    ));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_child_failure_reports_orphaned_parent() {
    let store = RecordingStore {
        fail_children: true,
        ..Default::default()
    };

    let err = SubmissionOrchestrator::new()
        .submit(&store, &answered_alumni_form())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::ChildInsert {
            parent_id: RecordingStore::PARENT_ID,
            ..
        }
    ));
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn test_duplicate_in_flight_submission_is_rejected() {
    let store = RecordingStore::default();
    let orchestrator = SubmissionOrchestrator::new();
    let form = answered_alumni_form();
    let key = form.validate().unwrap().dedup_key();

    let ticket = orchestrator.in_flight().try_acquire(key.clone()).unwrap();
    let err = orchestrator.submit(&store, &form).await.unwrap_err();
    assert!(matches!(err, SubmitError::AlreadySubmitting));
    assert!(store.calls().is_empty());

    drop(ticket);
    let receipt = orchestrator.submit(&store, &form).await.unwrap();
    assert_eq!(receipt.children, 3);
    assert!(!orchestrator.in_flight().contains(&key));
}
