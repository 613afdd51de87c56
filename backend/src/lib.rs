//! Student search service library.
//!
//! Hexagonal layout: [`domain`] owns the record, the mapper, and the ports;
//! [`inbound`] adapts HTTP requests onto them; [`outbound`] speaks to the
//! search store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
