//! Domain primitives, use-cases, and ports.
//!
//! Purpose: hold the student record, the mapping from store responses to
//! records, and the service that drives the search store through the
//! [`ports::SearchGateway`] port. Nothing here depends on actix or reqwest.
//!
//! Public surface:
//! - `Student` / `StudentDraft`: the indexed record and its pre-index form.
//! - `StudentService`: implements `StudentsCommand` and `StudentsQuery`.
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `TraceId`: request correlation identifier.

pub mod document_mapper;
pub mod error;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::student::{Student, StudentDraft};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;
