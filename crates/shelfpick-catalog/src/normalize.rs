//! Conversion from catalog response records to [`shelfpick_core::ProductEntry`].

use std::collections::HashSet;

use shelfpick_core::{Discount, ProductEntry, ProductImage, VariantEntry};

use crate::types::{CatalogProduct, CatalogVariant};

/// Decodes raw page records, skipping (and logging) any that do not match
/// the product shape.
pub(crate) fn decode_records(records: Vec<serde_json::Value>) -> Vec<CatalogProduct> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(product) => Some(product),
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed catalog record");
                None
            }
        })
        .collect()
}

/// Normalizes one page of catalog records, preserving order.
#[must_use]
pub fn normalize_page(products: Vec<CatalogProduct>) -> Vec<ProductEntry> {
    products.into_iter().map(normalize_product).collect()
}

/// Normalizes a raw [`CatalogProduct`] into a [`ProductEntry`].
///
/// Missing variants become an empty list. Variant ids must be unique within a
/// product; later duplicates are dropped with a warning.
#[must_use]
pub fn normalize_product(product: CatalogProduct) -> ProductEntry {
    let id = product.id.to_string();
    let mut seen = HashSet::new();

    let variants = product
        .variants
        .unwrap_or_default()
        .into_iter()
        .filter_map(|variant| {
            let variant = normalize_variant(variant);
            if seen.insert(variant.id.clone()) {
                Some(variant)
            } else {
                tracing::warn!(
                    product_id = %id,
                    variant_id = %variant.id,
                    "dropping duplicate variant id from catalog record"
                );
                None
            }
        })
        .collect();

    ProductEntry {
        title: product.title.unwrap_or_default(),
        image: product.image.map(|image| ProductImage {
            id: image.id.map(|i| i.to_string()),
            src: image.src,
        }),
        variants,
        discount: Discount::default(),
        id,
    }
}

fn normalize_variant(variant: CatalogVariant) -> VariantEntry {
    VariantEntry {
        id: variant.id.to_string(),
        title: variant.title.unwrap_or_default(),
        price: variant.price.map(|p| p.to_string()).unwrap_or_default(),
        discount_override: None,
    }
}
