//! List mutations as data, so a host can queue, log or replay them.

use serde::{Deserialize, Serialize};
use shelfpick_core::{DiscountField, ProductEntry};

use crate::list::ProductList;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ListOp {
    InsertPlaceholder,
    ReplaceAt {
        position: usize,
        products: Vec<ProductEntry>,
    },
    MoveEntry {
        from: usize,
        to: usize,
    },
    RemoveAt {
        position: usize,
    },
    UpdateDiscount {
        position: usize,
        change: DiscountField,
    },
    ClearDiscount {
        position: usize,
    },
    ToggleExpanded {
        position: usize,
    },
    MoveVariant {
        product: usize,
        from: usize,
        to: usize,
    },
    RemoveVariant {
        product: usize,
        variant: usize,
    },
    UpdateVariantDiscount {
        product: usize,
        variant: usize,
        change: DiscountField,
    },
    ClearVariantDiscount {
        product: usize,
        variant: usize,
    },
}

impl ProductList {
    /// Applies one operation. Returns `true` when the list changed.
    pub fn apply(&mut self, op: ListOp) -> bool {
        match op {
            ListOp::InsertPlaceholder => {
                self.insert_placeholder();
                true
            }
            ListOp::ReplaceAt { position, products } => self.replace_at(position, products),
            ListOp::MoveEntry { from, to } => self.move_entry(from, to),
            ListOp::RemoveAt { position } => self.remove_at(position),
            ListOp::UpdateDiscount { position, change } => self.update_discount(position, change),
            ListOp::ClearDiscount { position } => self.clear_discount(position),
            ListOp::ToggleExpanded { position } => self.toggle_expanded(position),
            ListOp::MoveVariant { product, from, to } => self.move_variant(product, from, to),
            ListOp::RemoveVariant { product, variant } => self.remove_variant(product, variant),
            ListOp::UpdateVariantDiscount {
                product,
                variant,
                change,
            } => self.update_variant_discount(product, variant, change),
            ListOp::ClearVariantDiscount { product, variant } => {
                self.clear_variant_discount(product, variant)
            }
        }
    }
}
