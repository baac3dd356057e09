//! Product lookup by SKU.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use favorites_core::{Price, Sku};

use crate::models::Product;

/// Resolves SKUs to product details.
pub trait ProductLookup: Send + Sync {
    /// Product for `sku`, or `None` if the catalog does not know it.
    fn lookup(&self, sku: &Sku) -> Option<Product>;
}

const PRODUCT_NOUNS: [&str; 10] = [
    "Laptop",
    "Phone",
    "Tablet",
    "Headphones",
    "Mouse",
    "Keyboard",
    "Monitor",
    "Printer",
    "Router",
    "Webcam",
];

const CATEGORIES: [&str; 5] = ["Electronics", "Accessories", "Computers", "Audio", "Video"];

/// Catalog that synthesizes a product for every SKU.
///
/// All fields derive from a SHA-256 digest of the SKU, so the same SKU always
/// yields the same product.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl MockCatalog {
    fn digest(sku: &Sku) -> u64 {
        let hash = Sha256::digest(sku.as_str().as_bytes());
        hash.first_chunk::<8>()
            .map_or(0, |prefix| u64::from_be_bytes(*prefix))
    }
}

impl ProductLookup for MockCatalog {
    #[allow(clippy::cast_possible_truncation, clippy::indexing_slicing)]
    fn lookup(&self, sku: &Sku) -> Option<Product> {
        let h = Self::digest(sku);
        let pick = |len: usize| (h % len as u64) as usize;

        let short: String = sku.as_str().chars().take(3).collect();
        let price = Price::new(Decimal::from(h % 1000 + 10));

        Some(Product {
            sku: sku.clone(),
            name: format!("{} {short}", PRODUCT_NOUNS[pick(PRODUCT_NOUNS.len())]),
            price,
            category: CATEGORIES[pick(CATEGORIES.len())].to_owned(),
            description: format!("Mock product description for SKU {sku}"),
            in_stock: h % 2 == 0,
        })
    }
}
