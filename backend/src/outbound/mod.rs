//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **elasticsearch**: reqwest-backed [`crate::domain::ports::SearchGateway`]
//!   speaking the Elasticsearch REST API.

pub mod elasticsearch;
