use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::Discount;

/// Sentinel id of a row that has no catalog product chosen yet.
pub const PLACEHOLDER_ID: &str = "empty";

const UNTITLED_VARIANT: &str = "Untitled Variant";
const ZERO_PRICE: &str = "0.00";

/// A product row in the discount editor, with its ordered variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Catalog product ID, stored as a string to avoid precision loss.
    /// [`PLACEHOLDER_ID`] for an empty row.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<ProductImage>,
    /// Missing in malformed catalog records; treated as no variants.
    #[serde(default)]
    pub variants: Vec<VariantEntry>,
    #[serde(default)]
    pub discount: Discount,
}

/// Primary image of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<String>,
    /// Canonical CDN URL.
    pub src: String,
}

/// A purchasable variant of a [`ProductEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Price as a decimal string exactly as the catalog returns it, e.g. `"12.99"`.
    #[serde(default)]
    pub price: String,
    /// Custom override of the owning product's discount.
    #[serde(default)]
    pub discount_override: Option<Discount>,
}

impl ProductEntry {
    /// Creates an empty row awaiting a catalog selection.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            title: String::new(),
            image: None,
            variants: Vec::new(),
            discount: Discount::default(),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }

    /// Whether the row offers a "show variants" toggle.
    #[must_use]
    pub fn has_multiple_variants(&self) -> bool {
        self.variants.len() > 1
    }

    /// A variant can be removed only while another one remains.
    #[must_use]
    pub fn can_remove_variant(&self) -> bool {
        self.variants.len() > 1
    }

    /// Returns the discount that applies to `variant`: its custom override if
    /// it has one, otherwise this product's discount.
    #[must_use]
    pub fn effective_discount<'a>(&'a self, variant: &'a VariantEntry) -> &'a Discount {
        variant.discount_override.as_ref().unwrap_or(&self.discount)
    }

    /// Returns the discounted price of the variant at `variant_index`, or
    /// `None` when the index is out of range, the price is not a decimal, or
    /// the discount arithmetic overflows.
    #[must_use]
    pub fn discounted_price(&self, variant_index: usize) -> Option<Decimal> {
        let variant = self.variants.get(variant_index)?;
        let price = variant.parsed_price()?;
        self.effective_discount(variant).apply(price)
    }
}

impl VariantEntry {
    #[must_use]
    pub fn has_custom_discount(&self) -> bool {
        self.discount_override.is_some()
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_VARIANT
        } else {
            &self.title
        }
    }

    #[must_use]
    pub fn display_price(&self) -> &str {
        if self.price.is_empty() {
            ZERO_PRICE
        } else {
            &self.price
        }
    }

    /// Parses [`Self::display_price`] as a decimal.
    #[must_use]
    pub fn parsed_price(&self) -> Option<Decimal> {
        Decimal::from_str(self.display_price()).ok()
    }
}
