//! DTOs for the parts of Elasticsearch responses the adapter reads itself.
//!
//! Successful index and search bodies are passed through untouched; only the
//! error envelope and the root info document are decoded here.

use serde::Deserialize;

use crate::domain::ports::ClusterInfo;

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorCauseDto,
}

/// Elasticsearch reports either a structured cause or, on some proxies and
/// older versions, a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ErrorCauseDto {
    Structured {
        #[serde(rename = "type")]
        error_type: String,
        reason: Option<String>,
    },
    Message(String),
}

impl ErrorCauseDto {
    pub(super) fn into_parts(self) -> (String, String) {
        match self {
            Self::Structured { error_type, reason } => (error_type, reason.unwrap_or_default()),
            Self::Message(message) => ("error".to_owned(), message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ClusterInfoDto {
    cluster_name: String,
    version: VersionDto,
}

#[derive(Debug, Deserialize)]
struct VersionDto {
    number: String,
}

impl From<ClusterInfoDto> for ClusterInfo {
    fn from(value: ClusterInfoDto) -> Self {
        Self {
            cluster_name: value.cluster_name,
            version: value.version.number,
        }
    }
}
