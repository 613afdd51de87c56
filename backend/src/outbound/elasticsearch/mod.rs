//! Elasticsearch outbound adapter.
//!
//! Implements the `SearchGateway` port over the store's REST API using a
//! single long-lived reqwest client.

mod dto;
mod http_gateway;

pub use http_gateway::{ElasticsearchCredentials, ElasticsearchGateway};
