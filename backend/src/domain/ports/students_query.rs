//! Driving port for student reads.

use async_trait::async_trait;

use crate::domain::{Error, Student};

/// Use-case port for searching students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// Return every student whose name matches `name`, in store order.
    async fn search_by_name(&self, name: &str) -> Result<Vec<Student>, Error>;
}
