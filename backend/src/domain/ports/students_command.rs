//! Driving port for student writes.

use async_trait::async_trait;

use crate::domain::{Error, Student};

/// Use-case port for creating (and internally removing) students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Index the raw JSON document and return the record with its assigned
    /// identifier.
    async fn create(&self, document: &[u8]) -> Result<Student, Error>;

    /// Delete a student by identifier. Not exposed over HTTP.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}
