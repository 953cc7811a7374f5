use crate::{doc, middleware::guard::require_role, state::AppState};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use models::guard::RouteGuard;

pub mod admin;
pub mod alumni;
pub mod employer;
pub mod fallback;
pub mod health;
pub mod lookup;
pub mod root;
pub mod staff;
pub mod student;

/// Routes reachable without a token
pub fn public() -> Router<AppState> {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(doc::openapi))
        .route("/departments", get(lookup::departments))
        .route("/regulations", get(lookup::regulations))
        .route("/semesters", get(lookup::semesters))
        .route("/subjects", get(lookup::subjects))
        .route("/questions/{feedback_type}", get(lookup::questions))
        .route("/alumni-feedback", post(alumni::submit_alumni_feedback))
        .route("/employer-feedback", post(employer::submit_employer_feedback))
}

/// Role-gated routes; the caller layers token validation on top
pub fn protected() -> Router<AppState> {
    let student = Router::new()
        .route("/stud/feedback-list/{feedback_type}", get(student::feedback_list))
        .route("/stud/feedback/{staff_mapping_id}", post(student::submit_feedback))
        .route_layer(middleware::from_fn_with_state(RouteGuard::STUDENT, require_role));

    let admin = Router::new()
        .route("/admin/staff", get(admin::staff))
        .route("/admin/feedback", post(admin::publish_feedback))
        .route("/admin/reports/{report}", get(admin::report))
        .route("/admin/response-list/{response_type}", get(admin::response_list))
        .route_layer(middleware::from_fn_with_state(RouteGuard::ADMIN, require_role));

    let staff = Router::new()
        .route("/staff/dashboard", get(staff::dashboard))
        .route_layer(middleware::from_fn_with_state(RouteGuard::STAFF, require_role));

    Router::new().merge(student).merge(admin).merge(staff)
}
