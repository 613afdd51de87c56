//! Student HTTP handlers.
//!
//! ```text
//! POST /student        {"name":"Ann","age":21,"average_score":3.5}
//! GET  /students?name=Ann
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use utoipa::IntoParams;

use crate::domain::{Error, Student};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::StudentSchema;
use crate::inbound::http::state::HttpState;

/// Largest document accepted by `POST /student`.
const MAX_DOCUMENT_BYTES: usize = 256 * 1024;

/// Query string for `GET /students`.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStudentsParams {
    /// Free-text match against the `name` field. Defaults to empty.
    pub name: String,
}

impl ListStudentsParams {
    /// Read `name` from a raw query string.
    ///
    /// The first occurrence wins when the key repeats; other keys are ignored
    /// and undecodable input degrades to the empty filter rather than failing.
    pub fn from_query(raw: &str) -> Self {
        let name = url::form_urlencoded::parse(raw.as_bytes())
            .find(|(key, _)| key == "name")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        Self { name }
    }
}

/// Index a student document.
///
/// The body is forwarded to the store untouched. The response echoes the
/// student fields found in the body together with the assigned identifier.
#[utoipa::path(
    post,
    path = "/student",
    request_body(content = serde_json::Value, content_type = "application/json"),
    responses(
        (status = 201, description = "Student indexed", body = StudentSchema),
        (status = 400, description = "Body could not be read", body = ErrorBody),
        (status = 413, description = "Document exceeds the size limit", body = ErrorBody),
        (status = 500, description = "Search store failure", body = ErrorBody)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/student")]
pub async fn create_student(
    state: web::Data<HttpState>,
    document: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let document = document.map_err(payload_error)?;
    let student = state.students.create(&document).await?;
    Ok(HttpResponse::Created().json(student))
}

/// Search students by name.
#[utoipa::path(
    get,
    path = "/students",
    params(ListStudentsParams),
    responses(
        (status = 200, description = "Matching students in store order", body = [StudentSchema]),
        (status = 500, description = "Search store failure", body = ErrorBody)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<Student>>> {
    let params = ListStudentsParams::from_query(req.query_string());
    let students = state
        .students_query
        .search_by_name(&params.name)
        .await?;
    Ok(web::Json(students))
}

fn payload_error(err: actix_web::Error) -> Error {
    let message = err.to_string();
    if err.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::payload_too_large(message)
    } else {
        Error::invalid_request(message)
    }
}

/// Register the student routes and their extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_DOCUMENT_BYTES))
        .service(create_student)
        .service(list_students);
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
