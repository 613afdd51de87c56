//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the student endpoints, the health probes, and the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds only.

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::StudentSchema;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student search API",
        description = "Index student records and search them by name."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::list_students,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(StudentSchema, ErrorBody)),
    tags(
        (name = "students", description = "Student indexing and search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
