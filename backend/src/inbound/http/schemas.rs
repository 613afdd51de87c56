//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their JSON shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = Student)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSchema {
    /// Identifier assigned by the search store.
    #[schema(example = "Qm9vayAx")]
    id: String,
    #[schema(example = "Ann")]
    name: String,
    /// Whole years; fractional input is truncated toward zero.
    #[schema(example = 21)]
    age: i64,
    #[schema(example = 3.5)]
    average_score: f64,
}
