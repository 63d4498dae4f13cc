//! Core business logic - framework-agnostic ordering, aggregation, and
//! reporting operations.
//!
//! Everything in here operates on a `DatabaseConnection` and returns plain
//! data; the HTTP layer is a thin shell around these functions.

pub mod catalog;
pub mod costs;
pub mod overlay;
pub mod report;
pub mod submission;

/// Unit kind stored on an order line for whole-box quantities. Fractional
/// lines store the product's own unit label instead.
pub const BOX_KIND: &str = "Box";

/// Normalizes a product name into the identifier used inside form field
/// names. Spaces and periods become underscores so the identifier survives
/// the round trip through HTML form keys; the report and the submission
/// parser must agree on this, so it lives in one place.
#[must_use]
pub fn field_key(name: &str) -> String {
    name.replace([' ', '.'], "_")
}
