//! Variants checked during a picker session, and their regrouping into
//! product rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shelfpick_core::{Discount, ProductEntry, ProductImage, VariantEntry};

/// A selected variant, annotated with the product it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedVariant {
    pub product_id: String,
    pub product_title: String,
    pub product_image: Option<ProductImage>,
    pub variant: VariantEntry,
}

/// Tri-state of a product's checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    /// Some but not all variants selected. Display only.
    Indeterminate,
    Checked,
}

/// Flat, ordered selection of variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<SelectedVariant>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[SelectedVariant] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_selected(&self, product_id: &str, variant_id: &str) -> bool {
        self.position_of(product_id, variant_id).is_some()
    }

    #[must_use]
    pub fn check_state(&self, product: &ProductEntry) -> CheckState {
        let selected = product
            .variants
            .iter()
            .filter(|v| self.is_selected(&product.id, &v.id))
            .count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == product.variants.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    /// Deselects every variant of `product` if all are selected, otherwise
    /// selects the missing ones. A partially selected product always becomes
    /// fully selected. Products without variants are ignored.
    pub fn toggle_product(&mut self, product: &ProductEntry) {
        if product.variants.is_empty() {
            return;
        }
        if self.check_state(product) == CheckState::Checked {
            self.items.retain(|item| {
                item.product_id != product.id
                    || !product.variants.iter().any(|v| v.id == item.variant.id)
            });
            return;
        }
        for variant in &product.variants {
            if !self.is_selected(&product.id, &variant.id) {
                self.items.push(Self::annotate(product, variant));
            }
        }
    }

    /// Flips the membership of exactly one variant.
    pub fn toggle_variant(&mut self, product: &ProductEntry, variant: &VariantEntry) {
        match self.position_of(&product.id, &variant.id) {
            Some(index) => {
                self.items.remove(index);
            }
            None => self.items.push(Self::annotate(product, variant)),
        }
    }

    /// Groups the selection back into product rows by product id, in order of
    /// each product's first selected variant. Variants keep selection order.
    #[must_use]
    pub fn commit(&self) -> Vec<ProductEntry> {
        let mut groups: Vec<ProductEntry> = Vec::new();
        let mut index_by_id: HashMap<&str, usize> = HashMap::new();

        for item in &self.items {
            if let Some(&index) = index_by_id.get(item.product_id.as_str()) {
                groups[index].variants.push(item.variant.clone());
            } else {
                index_by_id.insert(item.product_id.as_str(), groups.len());
                groups.push(ProductEntry {
                    id: item.product_id.clone(),
                    title: item.product_title.clone(),
                    image: item.product_image.clone(),
                    variants: vec![item.variant.clone()],
                    discount: Discount::default(),
                });
            }
        }
        groups
    }

    fn position_of(&self, product_id: &str, variant_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id && item.variant.id == variant_id)
    }

    fn annotate(product: &ProductEntry, variant: &VariantEntry) -> SelectedVariant {
        SelectedVariant {
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            product_image: product.image.clone(),
            variant: variant.clone(),
        }
    }
}
