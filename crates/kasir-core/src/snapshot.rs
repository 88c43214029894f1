//! # Snapshot Documents
//!
//! The export document and the import document for full-catalog backup.
//!
//! ## Round Trip
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /api/export                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Snapshot { products, categories, settings (raw rows), export_date }    │
//! │       │                                                                 │
//! │       │  (saved by the client, later posted back)                       │
//! │       ▼                                                                 │
//! │  ImportDocument { products, categories?, settings? }                    │
//! │       │                                                                 │
//! │       ▼  validate()  ─── missing products ──► ValidationError          │
//! │  ImportPlan (ids preserved, settings encoded)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  one transaction: DELETE all ─► INSERT all ─► COMMIT                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cross references are not checked: a product may name a category that is
//! absent from the document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Category, NewCategory, NewProduct, Product, ProductFields, Setting};
use crate::validation::{self, ValidationResult};

/// Full-catalog export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Raw setting rows; each `value` is encoded JSON text.
    pub settings: Vec<Setting>,
    pub export_date: String,
}

/// Document accepted by import.
///
/// `products` is optional only at the type level so that its absence is
/// reported as a validation failure naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportDocument {
    pub products: Option<Vec<ProductRecord>>,
    pub categories: Option<Vec<CategoryRecord>>,
    pub settings: Option<ImportSettings>,
}

/// A product row inside an import document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRecord {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: ProductFields,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A category row inside an import document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A setting row inside an import document, as produced by export.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingRecord {
    pub key: String,
    /// Encoded JSON text.
    pub value: String,
    pub updated_at: Option<String>,
}

/// Settings section of an import document.
///
/// Either the exported row array or a plain `key -> value` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImportSettings {
    Rows(Vec<SettingRecord>),
    Map(Map<String, Value>),
}

/// A product to insert, with its own id when one was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedProduct {
    pub id: Option<i64>,
    pub product: NewProduct,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A category to insert, with its own id when one was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedCategory {
    pub id: Option<i64>,
    pub category: NewCategory,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Validated import: everything the replace transaction needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    pub products: Vec<ImportedProduct>,
    pub categories: Vec<ImportedCategory>,
    pub settings: Vec<Setting>,
}

impl ImportDocument {
    /// Validates the document into an [`ImportPlan`].
    ///
    /// ## Rules
    /// - `products` must be present (may be empty)
    /// - each product needs `name, code, category, flex, catcode`
    /// - each category needs a non-blank `name`
    /// - setting rows must carry encoded JSON; map values are encoded here
    pub fn validate(self) -> ValidationResult<ImportPlan> {
        let records = self
            .products
            .ok_or_else(|| ValidationError::required("products"))?;

        let products = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let product = record
                    .fields
                    .validate()
                    .map_err(|e| at_index("products", i, e))?;
                Ok(ImportedProduct {
                    id: record.id,
                    product,
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        let categories = self
            .categories
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let name = validation::require_non_empty("name", record.name)
                    .map_err(|e| at_index("categories", i, e))?;
                Ok(ImportedCategory {
                    id: record.id,
                    category: NewCategory {
                        name,
                        image: record.image.unwrap_or_default(),
                    },
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        let settings = match self.settings {
            None => Vec::new(),
            Some(ImportSettings::Rows(rows)) => rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    validation::validate_encoded_json(&format!("settings[{i}].value"), &row.value)?;
                    Ok(Setting {
                        key: row.key,
                        value: row.value,
                        updated_at: row.updated_at,
                    })
                })
                .collect::<ValidationResult<Vec<_>>>()?,
            Some(ImportSettings::Map(map)) => map
                .into_iter()
                .map(|(key, value)| Setting {
                    key,
                    value: value.to_string(),
                    updated_at: None,
                })
                .collect(),
        };

        Ok(ImportPlan {
            products,
            categories,
            settings,
        })
    }
}

/// Prefixes a field error with the collection and row index.
fn at_index(collection: &str, index: usize, err: ValidationError) -> ValidationError {
    match err {
        ValidationError::Required { field } => {
            ValidationError::required(format!("{collection}[{index}].{field}"))
        }
        ValidationError::InvalidFormat { field, reason } => {
            ValidationError::invalid_format(format!("{collection}[{index}].{field}"), reason)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ImportDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_products_is_required() {
        let doc = parse(json!({ "categories": [] }));
        assert_eq!(
            doc.validate().unwrap_err(),
            ValidationError::required("products")
        );

        let doc = parse(json!({ "products": null }));
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_empty_products_is_valid() {
        let plan = parse(json!({ "products": [] })).validate().unwrap();
        assert_eq!(plan, ImportPlan::default());
    }

    #[test]
    fn test_product_ids_are_preserved() {
        let plan = parse(json!({
            "products": [
                { "id": 42, "name": "Cola", "code": "C001", "category": "Drinks",
                  "flex": "std", "catcode": "CC1", "image": null,
                  "created_at": "2024-01-01T00:00:00", "updated_at": null },
                { "name": "Tea", "code": "T001", "category": "Drinks",
                  "flex": "std", "catcode": "TC1" }
            ]
        }))
        .validate()
        .unwrap();

        assert_eq!(plan.products[0].id, Some(42));
        assert_eq!(plan.products[0].product.image, "");
        assert_eq!(
            plan.products[0].created_at.as_deref(),
            Some("2024-01-01T00:00:00")
        );
        assert_eq!(plan.products[1].id, None);
    }

    #[test]
    fn test_missing_product_field_names_the_row() {
        let err = parse(json!({
            "products": [
                { "name": "Cola", "code": "C001", "category": "Drinks",
                  "flex": "std", "catcode": "CC1" },
                { "name": "Tea", "category": "Drinks", "flex": "std", "catcode": "TC1" }
            ]
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::required("products[1].code"));
    }

    #[test]
    fn test_category_without_name_is_rejected() {
        let err = parse(json!({ "products": [], "categories": [{ "id": 1 }] }))
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::required("categories[0].name"));
    }

    #[test]
    fn test_setting_rows_must_be_encoded_json() {
        let plan = parse(json!({
            "products": [],
            "settings": [{ "key": "tax_rate", "value": "0.11", "updated_at": null }]
        }))
        .validate()
        .unwrap();
        assert_eq!(plan.settings[0].value, "0.11");

        let err = parse(json!({
            "products": [],
            "settings": [{ "key": "store", "value": "Toko Maju" }]
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_setting_map_is_encoded() {
        let plan = parse(json!({
            "products": [],
            "settings": { "printer": { "dpi": 203 }, "store": "Toko Maju" }
        }))
        .validate()
        .unwrap();

        let printer = plan.settings.iter().find(|s| s.key == "printer").unwrap();
        assert_eq!(printer.decode().unwrap(), json!({ "dpi": 203 }));
        let store = plan.settings.iter().find(|s| s.key == "store").unwrap();
        assert_eq!(store.value, "\"Toko Maju\"");
    }
}
