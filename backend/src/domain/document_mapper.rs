//! Mapping from raw search-store response bodies to student records.
//!
//! Envelopes are decoded into transport DTOs first; hit sources are then
//! coerced field by field so a shape mismatch names the exact path that
//! failed. Every failure is returned to the caller as a
//! [`DocumentMappingError`].

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::student::{Student, StudentDraft, truncate_age};

/// Reasons a store response could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentMappingError {
    /// The body is not JSON or its envelope does not match the expected shape.
    #[error("malformed store response: {message}")]
    Malformed { message: String },
    /// A required key is absent.
    #[error("store response is missing `{path}`")]
    MissingField { path: String },
    /// A key is present with an unexpected JSON type.
    #[error("store response field `{path}` is not {expected}")]
    WrongType { path: String, expected: &'static str },
}

#[derive(Debug, Deserialize)]
struct IndexAckDto {
    result: String,
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_version")]
    version: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponseDto {
    hits: HitsDto,
}

#[derive(Debug, Deserialize)]
struct HitsDto {
    hits: Vec<HitDto>,
}

#[derive(Debug, Deserialize)]
struct HitDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Map<String, Value>,
}

/// Read the store-assigned identifier from an index acknowledgment body.
///
/// # Examples
/// ```
/// use student_search::domain::document_mapper::extract_created_id;
///
/// let body = br#"{"result":"created","_id":"abc123","_version":1}"#;
/// assert_eq!(extract_created_id(body).unwrap(), "abc123");
/// ```
///
/// # Errors
/// Returns [`DocumentMappingError::Malformed`] when the body is not a JSON
/// object carrying `result`, `_id` (string), and `_version` (integer).
pub fn extract_created_id(body: &[u8]) -> Result<String, DocumentMappingError> {
    let ack: IndexAckDto = decode(body)?;
    debug!(result = %ack.result, version = ack.version, id = %ack.id, "document indexed");
    Ok(ack.id)
}

/// Map every hit of a search response body into a [`Student`].
///
/// Hits keep the order the store returned them in. `age` is truncated toward
/// zero; `average_score` is kept exactly.
///
/// # Errors
/// Returns [`DocumentMappingError`] when the envelope or any hit source does
/// not match the student shape.
pub fn extract_records(body: &[u8]) -> Result<Vec<Student>, DocumentMappingError> {
    let response: SearchResponseDto = decode(body)?;
    response
        .hits
        .hits
        .into_iter()
        .enumerate()
        .map(|(index, hit)| hit.into_student(index))
        .collect()
}

fn decode<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, DocumentMappingError> {
    serde_json::from_slice(body).map_err(|err| DocumentMappingError::Malformed {
        message: err.to_string(),
    })
}

impl HitDto {
    fn into_student(self, index: usize) -> Result<Student, DocumentMappingError> {
        let source = SourceFields {
            fields: &self.source,
            prefix: format!("hits.hits[{index}]._source"),
        };
        let name = source.require("name", "a string", Value::as_str)?;
        let age = source.require("age", "a number", Value::as_f64)?;
        let average_score = source.require("average_score", "a number", Value::as_f64)?;
        let age = source
            .fields
            .get("age")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| truncate_age(age));
        Ok(StudentDraft::new(name, age, average_score).with_id(self.id))
    }
}

struct SourceFields<'a> {
    fields: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> SourceFields<'a> {
    fn require<T>(
        &self,
        key: &str,
        expected: &'static str,
        coerce: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, DocumentMappingError> {
        let path = || format!("{}.{key}", self.prefix);
        let value = self
            .fields
            .get(key)
            .ok_or_else(|| DocumentMappingError::MissingField { path: path() })?;
        coerce(value).ok_or_else(|| DocumentMappingError::WrongType {
            path: path(),
            expected,
        })
    }
}
