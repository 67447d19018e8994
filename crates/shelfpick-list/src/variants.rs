//! Variant sub-list operations, scoped to one product row.

use shelfpick_core::DiscountField;

use crate::list::{move_item, ProductList};

impl ProductList {
    /// Moves a variant within one product, same pick-up-and-drop semantics as
    /// [`ProductList::move_entry`]. Out-of-range indices are a dropped gesture.
    pub fn move_variant(&mut self, product_index: usize, from: usize, to: usize) -> bool {
        let Some(product) = self.entries.get_mut(product_index) else {
            tracing::debug!(product_index, "ignoring move_variant: no such product");
            return false;
        };
        let moved = move_item(&mut product.variants, from, to);
        if !moved {
            tracing::debug!(
                product_index,
                from,
                to,
                variants = product.variants.len(),
                "ignoring move_variant"
            );
        }
        moved
    }

    /// Removes a variant, unless it is the product's last one.
    pub fn remove_variant(&mut self, product_index: usize, variant_index: usize) -> bool {
        let Some(product) = self.entries.get_mut(product_index) else {
            tracing::debug!(product_index, "ignoring remove_variant: no such product");
            return false;
        };
        if !product.can_remove_variant() || variant_index >= product.variants.len() {
            tracing::debug!(
                product_index,
                variant_index,
                variants = product.variants.len(),
                "ignoring remove_variant"
            );
            return false;
        }
        product.variants.remove(variant_index);
        true
    }

    /// Writes one half of a variant's custom discount.
    ///
    /// The first edit creates the override seeded from the product's current
    /// discount, so the half that was not edited keeps the value the merchant
    /// was looking at. From then on the variant no longer follows product
    /// discount changes.
    pub fn update_variant_discount(
        &mut self,
        product_index: usize,
        variant_index: usize,
        field: DiscountField,
    ) -> bool {
        let Some(product) = self.entries.get_mut(product_index) else {
            tracing::debug!(product_index, "ignoring update_variant_discount: no such product");
            return false;
        };
        let seed = product.discount.clone();
        let Some(variant) = product.variants.get_mut(variant_index) else {
            tracing::debug!(product_index, variant_index, "ignoring update_variant_discount");
            return false;
        };
        variant.discount_override.get_or_insert(seed).set(field);
        true
    }

    /// Drops a variant's custom discount so it inherits the product's again.
    pub fn clear_variant_discount(&mut self, product_index: usize, variant_index: usize) -> bool {
        let Some(variant) = self
            .entries
            .get_mut(product_index)
            .and_then(|p| p.variants.get_mut(variant_index))
        else {
            tracing::debug!(product_index, variant_index, "ignoring clear_variant_discount");
            return false;
        };
        variant.discount_override.take().is_some()
    }
}
