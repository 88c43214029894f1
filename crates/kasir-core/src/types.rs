//! # Domain Types
//!
//! Entities stored by the catalog and the request shapes that create them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │    Setting      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │   │  id (integer)   │   │  key (PK)       │       │
//! │  │  code (unique)  │   │  name (unique)  │   │  value (JSON    │       │
//! │  │  category ──────┼──►│  image          │   │   as text)      │       │
//! │  │   (by NAME)     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                        ┌──────────────────────┐                         │
//! │                        │  PrintHistoryEntry   │  append-only            │
//! │                        └──────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Reference
//! `Product::category` holds a category *name*, not an id. Renaming a
//! category leaves products with the old name; deleting one moves them to
//! [`UNCATEGORIZED`](crate::UNCATEGORIZED).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{self, ValidationResult};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Auto-assigned row id.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name shown to the cashier.
    pub name: String,

    /// Product code, unique across all products.
    pub code: String,

    /// Name of the category this product belongs to.
    pub category: String,

    /// Application-defined classification.
    pub flex: String,

    pub catcode: String,

    /// Image URL or path.
    pub image: Option<String>,

    pub created_at: Option<String>,

    pub updated_at: Option<String>,
}

/// Product fields as sent by the client.
///
/// Every field is optional here so that a missing field becomes a
/// [`ValidationError`](crate::ValidationError) naming the field, not a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFields {
    pub name: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub flex: Option<String>,
    pub catcode: Option<String>,
    pub image: Option<String>,
}

/// Validated product fields, ready for insert or full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub category: String,
    pub flex: String,
    pub catcode: String,
    pub image: String,
}

impl ProductFields {
    /// Checks that `name`, `code`, `category`, `flex` and `catcode` are present.
    ///
    /// `image` defaults to an empty string.
    pub fn validate(self) -> ValidationResult<NewProduct> {
        Ok(NewProduct {
            name: validation::require("name", self.name)?,
            code: validation::require("code", self.code)?,
            category: validation::require("category", self.category)?,
            flex: validation::require("flex", self.flex)?,
            catcode: validation::require("catcode", self.catcode)?,
            image: self.image.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    #[ts(type = "number")]
    pub id: i64,

    /// Category name, unique across all categories.
    pub name: String,

    pub image: Option<String>,

    pub created_at: Option<String>,

    pub updated_at: Option<String>,
}

/// Category fields as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFields {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Validated category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub image: String,
}

impl CategoryFields {
    /// Checks that `name` is present and not blank.
    pub fn validate(self) -> ValidationResult<NewCategory> {
        Ok(NewCategory {
            name: validation::require_non_empty("name", self.name)?,
            image: self.image.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Setting
// =============================================================================

/// A stored setting row.
///
/// `value` is the JSON encoding of the setting; use [`Setting::decode`] to
/// get the value back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Setting {
    pub key: String,

    /// Encoded JSON text.
    pub value: String,

    pub updated_at: Option<String>,
}

impl Setting {
    /// Decodes the stored value.
    pub fn decode(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.value)
    }
}

// =============================================================================
// Print History
// =============================================================================

/// One label printed by the scale/printer tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PrintHistoryEntry {
    #[ts(type = "number")]
    pub id: i64,

    pub barcode: Option<String>,

    pub product_name: Option<String>,

    /// Weight as printed on the label (e.g. "0.250").
    pub weight: Option<String>,

    pub timestamp: Option<String>,
}

/// Print job fields as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrintJobFields {
    pub barcode: Option<String>,
    pub product_name: Option<String>,
    pub weight: Option<String>,
}

/// Validated print job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrintJob {
    pub barcode: String,
    pub product_name: String,
    pub weight: String,
}

impl PrintJobFields {
    /// Checks that `barcode`, `product_name` and `weight` are present.
    pub fn validate(self) -> ValidationResult<NewPrintJob> {
        Ok(NewPrintJob {
            barcode: validation::require_non_empty("barcode", self.barcode)?,
            product_name: validation::require("product_name", self.product_name)?,
            weight: validation::require("weight", self.weight)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn cola() -> ProductFields {
        ProductFields {
            name: Some("Cola".into()),
            code: Some("C001".into()),
            category: Some("Drinks".into()),
            flex: Some("std".into()),
            catcode: Some("CC1".into()),
            image: None,
        }
    }

    #[test]
    fn test_product_fields_defaults_image() {
        let product = cola().validate().unwrap();
        assert_eq!(product.code, "C001");
        assert_eq!(product.image, "");
    }

    #[test]
    fn test_product_fields_reports_first_missing_field() {
        let mut fields = cola();
        fields.flex = None;
        assert_eq!(
            fields.validate().unwrap_err(),
            ValidationError::required("flex")
        );
    }

    #[test]
    fn test_product_fields_from_json_without_catcode() {
        let fields: ProductFields = serde_json::from_str(
            r#"{"name":"Cola","code":"C001","category":"Drinks","flex":"std"}"#,
        )
        .unwrap();
        assert_eq!(
            fields.validate().unwrap_err(),
            ValidationError::required("catcode")
        );
    }

    #[test]
    fn test_category_fields_reject_blank_name() {
        let fields = CategoryFields {
            name: Some("  ".into()),
            image: None,
        };
        assert!(fields.validate().is_err());

        let fields = CategoryFields {
            name: Some("Drinks".into()),
            image: Some("drinks.png".into()),
        };
        let category = fields.validate().unwrap();
        assert_eq!(category.image, "drinks.png");
    }

    #[test]
    fn test_setting_decode() {
        let setting = Setting {
            key: "printer".into(),
            value: r#"{"dpi":203}"#.into(),
            updated_at: None,
        };
        assert_eq!(setting.decode().unwrap(), serde_json::json!({"dpi": 203}));
    }

    #[test]
    fn test_print_job_requires_barcode() {
        let fields = PrintJobFields {
            barcode: None,
            product_name: Some("Cola".into()),
            weight: Some("1.0".into()),
        };
        assert_eq!(
            fields.validate().unwrap_err(),
            ValidationError::required("barcode")
        );
    }
}
