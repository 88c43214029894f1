//! # kasir-core: Domain Types for the Kasir Catalog
//!
//! This crate holds the catalog's domain model with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Frontend (cashier UI, scanner, printer tooling)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-api (axum)                             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                   │   │
//! │  │   │   types   │  │ snapshot  │  │ validation│                   │   │
//! │  │   │  Product  │  │  export   │  │  required │                   │   │
//! │  │   │  Category │  │  import   │  │  fields   │                   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (SQLite)                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Stored entities (Product, Category, Setting, PrintHistoryEntry)
//!   and the request shapes that create them
//! - [`snapshot`] - Export document and import document
//! - [`validation`] - Required-field rules shared by every write path
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::types::ProductFields;
//!
//! let fields = ProductFields {
//!     name: Some("Cola".into()),
//!     code: Some("C001".into()),
//!     category: Some("Drinks".into()),
//!     flex: Some("std".into()),
//!     catcode: Some("CC1".into()),
//!     image: None,
//! };
//!
//! let product = fields.validate().unwrap();
//! assert_eq!(product.image, "");
//! ```

pub mod error;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use snapshot::{ImportDocument, ImportPlan, Snapshot};
pub use types::*;

use chrono::{SecondsFormat, Utc};

/// Category name products fall back to when their category is deleted.
pub const UNCATEGORIZED: &str = "Lainnya";

/// Current time as an ISO-8601 (RFC 3339, UTC, millisecond) string.
///
/// Every stored timestamp is text, so imported rows keep whatever ISO-8601
/// shape they were exported with.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
