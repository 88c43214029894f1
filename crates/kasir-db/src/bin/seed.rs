//! # Seed Data Generator
//!
//! Populates the catalog with sample data for development.
//!
//! ## Usage
//! ```bash
//! # Generate 150 products (default)
//! cargo run -p kasir-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p kasir-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/pos.db
//! ```
//!
//! ## Generated Data
//! - One category per group below (Minuman, Makanan Ringan, Sembako, ...)
//! - Products cycling through each group's names with a weight variant,
//!   at most one per (name, variant) pair
//! - Default store settings (store name, tax rate, printer)
//!
//! Each product has:
//! - Unique code: `{CATCODE}{INDEX:05}`
//! - Category name referencing a seeded category
//! - Flex tag `std` or `timbang` (sold by weight)

use kasir_core::{NewCategory, NewProduct};
use kasir_db::{Database, DbConfig};
use serde_json::json;
use std::env;

/// Catalog groups: (category name, catcode, product names)
const GROUPS: &[(&str, &str, &[&str])] = &[
    (
        "Minuman",
        "MNM",
        &[
            "Teh Botol",
            "Aqua",
            "Kopi Kapal Api",
            "Susu Ultra",
            "Pocari Sweat",
            "Fanta",
            "Coca-Cola",
            "Sprite",
        ],
    ),
    (
        "Makanan Ringan",
        "SNK",
        &[
            "Chitato",
            "Qtela",
            "Taro",
            "Oreo",
            "Beng-Beng",
            "SilverQueen",
            "Tango Wafer",
            "Richeese",
        ],
    ),
    (
        "Sembako",
        "SMB",
        &[
            "Beras Pandan Wangi",
            "Gula Pasir",
            "Minyak Goreng",
            "Tepung Terigu",
            "Telur Ayam",
            "Garam",
            "Kecap Manis",
            "Mie Instan",
        ],
    ),
    (
        "Daging",
        "DGG",
        &[
            "Daging Sapi",
            "Ayam Potong",
            "Ikan Tongkol",
            "Udang",
            "Sosis",
            "Nugget",
        ],
    ),
    (
        "Buah",
        "BUA",
        &[
            "Apel Fuji",
            "Jeruk Medan",
            "Pisang Cavendish",
            "Semangka",
            "Mangga Harum Manis",
            "Anggur",
        ],
    ),
];

/// Variants appended to product names; `true` means sold by weight
const VARIANTS: &[(&str, bool)] = &[
    ("250g", true),
    ("500g", true),
    ("1kg", true),
    ("Kecil", false),
    ("Besar", false),
];

const DEFAULT_COUNT: usize = 150;

/// Number of distinct products the groups and variants can produce.
fn capacity() -> usize {
    GROUPS.iter().map(|(_, _, names)| names.len()).sum::<usize>() * VARIANTS.len()
}

/// Requested count capped at [`capacity`].
fn planned_count(requested: usize) -> usize {
    requested.min(capacity())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = DEFAULT_COUNT;
    let mut db_path = String::from("./pos.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -c, --count <N>    Number of products to generate (default: {}, max: {})",
                    DEFAULT_COUNT,
                    capacity()
                );
                println!("  -d, --db <PATH>    Database file path (default: ./pos.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let requested = count;
    count = planned_count(requested);

    println!("🌱 Kasir Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    if count < requested {
        println!(
            "  (capped from {}: only {} name/variant pairs exist)",
            requested, count
        );
    }
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Schema applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Categories first so every product references an existing name
    let mut categories = 0;
    for (name, catcode, _) in GROUPS {
        let category = NewCategory {
            name: name.to_string(),
            image: format!("{}.png", catcode.to_lowercase()),
        };
        if let Err(e) = db.categories().insert(&category).await {
            eprintln!("Failed to insert category {}: {}", name, e);
            continue;
        }
        categories += 1;
    }
    println!("✓ Seeded {} of {} categories", categories, GROUPS.len());

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut seq = 0;

    'outer: for (category, catcode, names) in GROUPS {
        for name in names.iter() {
            for (variant, by_weight) in VARIANTS {
                if generated >= count {
                    break 'outer;
                }
                seq += 1;

                let product = generate_product(category, catcode, name, variant, *by_weight, seq);
                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.code, e);
                    continue;
                }

                generated += 1;
                if generated % 50 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let defaults = json!({
        "store_name": "Toko Kasir",
        "tax_rate": 0.11,
        "currency": "IDR",
        "printer": { "dpi": 203, "label_width_mm": 58 }
    });
    if let Some(values) = defaults.as_object() {
        db.settings().save(values).await?;
        println!("✓ Saved {} default settings", values.len());
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one product from its group and variant.
fn generate_product(
    category: &str,
    catcode: &str,
    name: &str,
    variant: &str,
    by_weight: bool,
    seq: usize,
) -> NewProduct {
    NewProduct {
        name: format!("{} {}", name, variant),
        code: format!("{}{:05}", catcode, seq),
        category: category.to_string(),
        flex: if by_weight { "timbang" } else { "std" }.to_string(),
        catcode: catcode.to_string(),
        image: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_count_fits_the_catalog() {
        assert_eq!(capacity(), 36 * 5);
        assert_eq!(planned_count(DEFAULT_COUNT), DEFAULT_COUNT);
    }

    #[test]
    fn test_count_is_capped_at_capacity() {
        assert_eq!(planned_count(200), 180);
        assert_eq!(planned_count(usize::MAX), capacity());
        assert_eq!(planned_count(0), 0);
    }

    #[test]
    fn test_generated_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        let mut seq = 0;
        for (category, catcode, names) in GROUPS {
            for name in names.iter() {
                for (variant, by_weight) in VARIANTS {
                    seq += 1;
                    let product =
                        generate_product(category, catcode, name, variant, *by_weight, seq);
                    assert!(codes.insert(product.code));
                }
            }
        }
        assert_eq!(codes.len(), capacity());
    }
}
