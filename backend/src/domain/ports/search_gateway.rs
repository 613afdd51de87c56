//! Driven port for the backing full-text search store.
//!
//! The domain owns the operation set and error contract; outbound adapters
//! own the wire protocol. Successful calls hand back the raw response body so
//! the document mapper decides how to read it.

use async_trait::async_trait;

use super::define_port_error;

/// Identity reported by the store when probed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    /// Name of the cluster answering requests.
    pub cluster_name: String,
    /// Store version string, e.g. `8.13.0`.
    pub version: String,
}

define_port_error! {
    /// Errors surfaced while calling the search store.
    pub enum SearchGatewayError {
        /// The request never produced a response.
        Transport { message: String } =>
            "search store transport failed: {message}",
        /// The store did not answer within the configured timeout.
        Timeout { message: String } =>
            "search store timeout: {message}",
        /// The store answered with an error status.
        Store { status: u16, error_type: String, reason: String } =>
            "search store rejected request [{status}] {error_type}: {reason}",
        /// The addressed document does not exist.
        DocumentNotFound { id: String } =>
            "document {id} not found",
        /// The store response could not be read.
        Decode { message: String } =>
            "search store response unreadable: {message}",
    }
}

/// Port for the two request-path operations plus the internal helpers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Index `document` into `index`, asking the store to make it visible to
    /// subsequent searches before acknowledging. Returns the ack body.
    async fn create_document(
        &self,
        index: &str,
        document: &[u8],
    ) -> Result<Vec<u8>, SearchGatewayError>;

    /// Run a single `match` query on the `name` field with an exact total hit
    /// count. Returns the search response body.
    async fn search_by_name(&self, index: &str, name: &str)
    -> Result<Vec<u8>, SearchGatewayError>;

    /// Remove one document by identifier.
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchGatewayError>;

    /// Probe the store root to confirm connectivity and credentials.
    async fn cluster_info(&self) -> Result<ClusterInfo, SearchGatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_carry_type_and_reason() {
        let err = SearchGatewayError::store(
            400_u16,
            "parsing_exception",
            "unknown query [matchx]",
        );
        assert_eq!(
            err.to_string(),
            "search store rejected request [400] parsing_exception: unknown query [matchx]"
        );
    }
}
