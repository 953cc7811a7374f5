use crate::routes::{admin, alumni, employer, health, lookup, root, staff, student};
use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        lookup::departments,
        lookup::regulations,
        lookup::semesters,
        lookup::subjects,
        lookup::questions,
        alumni::submit_alumni_feedback,
        employer::submit_employer_feedback,
        student::feedback_list,
        student::submit_feedback,
        staff::dashboard,
        admin::staff,
        admin::publish_feedback,
        admin::report,
        admin::response_list
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Lookups", description = "Dropdown options and questionnaires"),
        (name = "Feedback", description = "Public alumni and employer feedback"),
        (name = "Student", description = "Course and lab feedback by students"),
        (name = "Staff", description = "Staff dashboard"),
        (name = "Admin", description = "Publishing feedback cycles and reports"),
    ),
    info(
        title = "Feedback API",
        version = "1.0.0",
        description = "Student, alumni and employer feedback collection",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

/// OpenAPI document for this service
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
