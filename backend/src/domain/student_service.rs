//! Student use-cases backed by the search store.
//!
//! Forwards requests through the [`SearchGateway`] port, reshapes the raw
//! responses with the document mapper, and converts every downstream failure
//! into a domain [`Error`] so the request fails without taking the process
//! down.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::document_mapper::{DocumentMappingError, extract_created_id, extract_records};
use crate::domain::ports::{SearchGateway, SearchGatewayError, StudentsCommand, StudentsQuery};
use crate::domain::{Error, Student, StudentDraft};

/// Student command and query service bound to one index.
#[derive(Clone)]
pub struct StudentService {
    gateway: Arc<dyn SearchGateway>,
    index: String,
}

impl StudentService {
    /// Bind the service to a gateway and the index holding student documents.
    pub fn new(gateway: Arc<dyn SearchGateway>, index: impl Into<String>) -> Self {
        Self {
            gateway,
            index: index.into(),
        }
    }

    /// Name of the index this service reads and writes.
    pub fn index(&self) -> &str {
        self.index.as_str()
    }
}

fn map_gateway_error(err: SearchGatewayError) -> Error {
    warn!(error = %err, "search store call failed");
    match err {
        SearchGatewayError::DocumentNotFound { .. } => Error::not_found(err.to_string()),
        _ => Error::internal(err.to_string()),
    }
}

fn map_mapping_error(err: DocumentMappingError) -> Error {
    warn!(error = %err, "search store response did not match the student shape");
    Error::internal(err.to_string())
}

#[async_trait]
impl StudentsCommand for StudentService {
    async fn create(&self, document: &[u8]) -> Result<Student, Error> {
        let ack = self
            .gateway
            .create_document(&self.index, document)
            .await
            .map_err(map_gateway_error)?;
        let id = extract_created_id(&ack).map_err(map_mapping_error)?;
        let draft = serde_json::from_slice::<Value>(document)
            .map(|value| StudentDraft::from_document(&value))
            .unwrap_or_default();
        info!(index = %self.index, id = %id, "student created");
        Ok(draft.with_id(id))
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.gateway
            .delete_document(&self.index, id)
            .await
            .map_err(map_gateway_error)?;
        info!(index = %self.index, id = %id, "student deleted");
        Ok(())
    }
}

#[async_trait]
impl StudentsQuery for StudentService {
    async fn search_by_name(&self, name: &str) -> Result<Vec<Student>, Error> {
        let body = self
            .gateway
            .search_by_name(&self.index, name)
            .await
            .map_err(map_gateway_error)?;
        let students = extract_records(&body).map_err(map_mapping_error)?;
        info!(index = %self.index, name = %name, hits = students.len(), "students searched");
        Ok(students)
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
