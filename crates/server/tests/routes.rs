use axum::{
    Extension, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{DateTime, FixedOffset};
use database::entities::{
    alumni_responses, departments, dept_subjects, feedback, questions, responses,
    staff_mappings, staff_profiles, student_profiles, subjects,
};
use models::feedback_type::QuestionCategory;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use server::{app, middleware::guard::SessionClaims, routes, state::AppState};
use tower::ServiceExt;
use uuid::Uuid;

fn timestamp() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-06-01T10:00:00+05:30").unwrap()
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn app_with(db: DatabaseConnection, claims: Option<SessionClaims>) -> Router {
    let protected = match claims {
        Some(claims) => routes::protected().layer(Extension(claims)),
        None => routes::protected(),
    };
    app(AppState::new(db), protected)
}

fn signed_in(role: &str) -> Option<SessionClaims> {
    Some(SessionClaims {
        sub: Some(Uuid::new_v4().to_string()),
        user_role: Some(role.to_string()),
    })
}

fn question(id: i32, feedback_type: QuestionCategory) -> questions::Model {
    questions::Model {
        id,
        feedback_type,
        question_no: id,
        question: format!("Question {id}"),
        no_of_options: Some(3),
    }
}

fn subject(id: i32, is_theory: bool) -> subjects::Model {
    subjects::Model {
        id,
        code: format!("CS{id}"),
        name: format!("Subject {id}"),
        short_name: None,
        is_theory,
        category: None,
        reg_id: Some(3),
        created_at: timestamp(),
    }
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = get(app_with(empty_db(), None), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_unknown_path_redirects_to_not_found_page() {
    let response = get(app_with(empty_db(), None), "/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["redirect"], "/errors/404");
}

#[tokio::test]
async fn test_admin_route_requires_sign_in() {
    let response = get(app_with(empty_db(), None), "/admin/staff").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["redirect"], "/auth/sign-in");
}

#[tokio::test]
async fn test_admin_route_rejects_student() {
    let response = get(app_with(empty_db(), signed_in("stud")), "/admin/reports/alumni").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["redirect"], "/errors/403");
}

#[tokio::test]
async fn test_staff_route_rejects_unknown_role() {
    let response = get(app_with(empty_db(), signed_in("visitor")), "/staff/dashboard").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_report_is_not_found() {
    let response = get(app_with(empty_db(), signed_in("admin")), "/admin/reports/parents").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_student_feedback_type_is_not_found() {
    let response = get(
        app_with(empty_db(), signed_in("stud")),
        "/stud/feedback-list/exam",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["redirect"], "/errors/404");
}

#[tokio::test]
async fn test_departments() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![departments::Model {
            id: 1,
            name: "Computer Science".to_string(),
            short_name: "CSE".to_string(),
            created_at: timestamp(),
        }]])
        .into_connection();

    let response = get(app_with(db, None), "/departments").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{ "id": "1", "text": "Computer Science" }])
    );
}

#[tokio::test]
async fn test_semesters() {
    let response = get(app_with(empty_db(), None), "/semesters").await;
    let body = json_body(response).await;

    let semesters = body.as_array().unwrap();
    assert_eq!(semesters.len(), 8);
    assert_eq!(semesters[0], json!({ "id": "1", "text": "1" }));
}

#[tokio::test]
async fn test_alumni_feedback_rejects_invalid_batch() {
    let response = post_json(
        app_with(empty_db(), None),
        "/alumni-feedback",
        json!({
            "alumni_name": "Asha",
            "batch": "24",
            "department_id": 1,
            "answers": [
                { "question_id": 1, "score": 3 },
                { "question_id": 2, "score": 2 }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "Please Enter a Valid Batch");
}

#[tokio::test]
async fn test_alumni_feedback_requires_department() {
    let response = post_json(
        app_with(empty_db(), None),
        "/alumni-feedback",
        json!({ "alumni_name": "Asha", "batch": "2019" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await["error"],
        "Please Select Your Department"
    );
}

#[tokio::test]
async fn test_employer_feedback_requires_company() {
    let response = post_json(
        app_with(empty_db(), None),
        "/employer-feedback",
        json!({
            "employer_name": "Ravi",
            "company": "  ",
            "answers": [{ "question_id": 1, "score": 2 }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "Please Enter Your Company");
}

#[tokio::test]
async fn test_alumni_feedback_rejects_out_of_range_score() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![question(1, QuestionCategory::Peo)]])
        .into_connection();

    let response = post_json(
        app_with(db, None),
        "/alumni-feedback",
        json!({
            "alumni_name": "Asha",
            "batch": "2019",
            "department_id": 1,
            "answers": [{ "question_id": 1, "score": 0 }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await["error"],
        "Score must be between 1 and 3"
    );
}

#[tokio::test]
async fn test_alumni_feedback_is_stored() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            question(1, QuestionCategory::Peo),
            question(2, QuestionCategory::Po),
        ]])
        .append_query_results([vec![alumni_responses::Model {
            id: 9,
            alumni_name: "Asha".to_string(),
            batch: "2019".to_string(),
            dept_id: 1,
            created_at: timestamp(),
        }]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let response = post_json(
        app_with(db, None),
        "/alumni-feedback",
        json!({
            "alumni_name": "Asha",
            "batch": "2019",
            "department_id": 1,
            "answers": [
                { "question_id": 1, "score": 3 },
                { "question_id": 2, "score": 2 }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], 9);
    assert_eq!(body["saved_rows"], 2);
    assert_eq!(body["message"], "Thank You For Your Feedback!!!");
    assert_eq!(body["navigate_to"], "/");
}

#[tokio::test]
async fn test_publish_without_department_is_rejected() {
    let response = post_json(
        app_with(empty_db(), signed_in("admin")),
        "/admin/feedback",
        json!({
            "batch": "2024",
            "section": "a",
            "regulation_id": 3,
            "semester": 5
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await["error"],
        "Please Select Your Department"
    );
}

#[tokio::test]
async fn test_publish_rejects_invalid_batch() {
    let response = post_json(
        app_with(empty_db(), signed_in("admin")),
        "/admin/feedback",
        json!({
            "batch": "24",
            "department_id": 1,
            "section": "a",
            "regulation_id": 3,
            "semester": 5,
            "assignments": [{ "subject_id": 100, "staff_id": Uuid::new_v4() }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "Please Enter a Valid Batch");
}

#[tokio::test]
async fn test_publish_rejects_unknown_staff() {
    let stranger = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![dept_subjects::Model {
            id: 1,
            dept_id: 1,
            reg_id: 3,
            sem: 5,
            subject_id: 100,
        }]])
        .append_query_results([vec![subject(100, true)]])
        .append_query_results([vec![staff_profiles::Model {
            id: Uuid::new_v4(),
            name: Some("Ada".to_string()),
            staff_no: None,
            designation: None,
            dept_id: Some(1),
        }]])
        .into_connection();

    let response = post_json(
        app_with(db, signed_in("admin")),
        "/admin/feedback",
        json!({
            "batch": "2024",
            "department_id": 1,
            "section": "a",
            "regulation_id": 3,
            "semester": 5,
            "assignments": [{ "subject_id": 100, "staff_id": stranger }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await["error"],
        format!("Unknown staff {stranger}")
    );
}

#[tokio::test]
async fn test_student_feedback_is_stored() {
    let claims = signed_in("stud");
    let student_id: Uuid = claims.as_ref().unwrap().sub.as_deref().unwrap().parse().unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![student_profiles::Model {
            id: student_id,
            name: Some("Meena".to_string()),
            roll_no: Some(2024001),
            batch: Some(2024),
            dept_id: Some(1),
            section: Some("a".to_string()),
            is_new_user: false,
        }]])
        .append_query_results([vec![feedback::Model {
            id: 7,
            batch: 2024,
            department_id: 1,
            regulation_id: 3,
            sem: 5,
            section: "A".to_string(),
            created_at: timestamp(),
        }]])
        .append_query_results([vec![(
            staff_mappings::Model {
                id: 20,
                feedback_id: 7,
                staff_id: Uuid::new_v4(),
                sub_id: 100,
                created_at: timestamp(),
            },
            subject(100, true),
        )]])
        .append_query_results([Vec::<responses::Model>::new()])
        .append_query_results([vec![
            question(1, QuestionCategory::Course),
            question(2, QuestionCategory::Course),
        ]])
        .append_query_results([vec![responses::Model {
            id: 41,
            staff_mapping_id: 20,
            student_id,
            created_at: timestamp(),
        }]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let response = post_json(
        app_with(db, claims),
        "/stud/feedback/20",
        json!({
            "answers": [
                { "question_id": 1, "score": 3 },
                { "question_id": 2, "score": 1 }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], 41);
    assert_eq!(body["saved_rows"], 2);
}

#[tokio::test]
async fn test_openapi_document() {
    let response = get(app_with(empty_db(), None), "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["info"]["title"], "Feedback API");
    assert!(body["paths"]["/admin/feedback"]["post"].is_object());
}
