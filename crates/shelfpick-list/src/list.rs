//! The ordered product list and its position-level operations.
//!
//! Every operation takes positions as plain indices and silently ignores
//! out-of-range arguments: a stale drag gesture racing a removal is normal,
//! not an error. Mutating operations return `true` when they changed
//! something.

use serde::{Deserialize, Serialize};
use shelfpick_core::{DiscountField, ProductEntry};

use crate::expansion::ExpansionMap;

/// Product rows plus the expansion flags keyed by row position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ListParts")]
pub struct ProductList {
    pub(crate) entries: Vec<ProductEntry>,
    pub(crate) expanded: ExpansionMap,
}

/// Unchecked wire form of a [`ProductList`].
#[derive(Deserialize)]
struct ListParts {
    entries: Vec<ProductEntry>,
    #[serde(default)]
    expanded: ExpansionMap,
}

impl TryFrom<ListParts> for ProductList {
    type Error = String;

    fn try_from(parts: ListParts) -> Result<Self, Self::Error> {
        let len = parts.entries.len();
        if let Some(key) = parts.expanded.keys().find(|&key| key >= len) {
            return Err(format!(
                "expansion flag for row {key} but the list has {len} rows"
            ));
        }
        Ok(Self {
            entries: parts.entries,
            expanded: parts.expanded,
        })
    }
}

impl ProductList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding a single placeholder row, as the editor first renders.
    #[must_use]
    pub fn with_placeholder() -> Self {
        let mut list = Self::new();
        list.insert_placeholder();
        list
    }

    #[must_use]
    pub fn entries(&self) -> &[ProductEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&ProductEntry> {
        self.entries.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionMap {
        &self.expanded
    }

    #[must_use]
    pub fn is_expanded(&self, position: usize) -> bool {
        self.expanded.is_expanded(position)
    }

    /// Appends an empty row.
    pub fn insert_placeholder(&mut self) {
        self.entries.push(ProductEntry::placeholder());
    }

    /// Replaces the row at `position` with `products[0]` and inserts the rest
    /// right after it.
    pub fn replace_at(&mut self, position: usize, products: Vec<ProductEntry>) -> bool {
        if position >= self.entries.len() || products.is_empty() {
            tracing::debug!(
                position,
                len = self.entries.len(),
                batch = products.len(),
                "ignoring replace_at"
            );
            return false;
        }
        let batch_len = products.len();
        self.entries.splice(position..=position, products);
        self.expanded.realign_replace(position, batch_len);
        true
    }

    /// Moves the row at `from` so that it ends up at `to`, shifting the rows
    /// in between. This is a pick-up-and-drop, not a swap.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if !move_item(&mut self.entries, from, to) {
            tracing::debug!(from, to, len = self.entries.len(), "ignoring move_entry");
            return false;
        }
        self.expanded.realign_move(from, to);
        true
    }

    /// Removes the row at `position`. The list may become empty.
    pub fn remove_at(&mut self, position: usize) -> bool {
        if position >= self.entries.len() {
            tracing::debug!(position, len = self.entries.len(), "ignoring remove_at");
            return false;
        }
        self.entries.remove(position);
        self.expanded.realign_remove(position);
        true
    }

    /// Writes one half of the row's product-level discount. Values are not
    /// range-checked here.
    pub fn update_discount(&mut self, position: usize, field: DiscountField) -> bool {
        let Some(entry) = self.entries.get_mut(position) else {
            tracing::debug!(position, "ignoring update_discount");
            return false;
        };
        entry.discount.set(field);
        true
    }

    /// Removes the row's product-level discount.
    pub fn clear_discount(&mut self, position: usize) -> bool {
        let Some(entry) = self.entries.get_mut(position) else {
            tracing::debug!(position, len = self.entries.len(), "ignoring clear_discount");
            return false;
        };
        entry.discount = shelfpick_core::Discount::default();
        true
    }

    /// Flips the "variants visible" flag of an existing row.
    pub fn toggle_expanded(&mut self, position: usize) -> bool {
        if position >= self.entries.len() {
            tracing::debug!(position, "ignoring toggle_expanded");
            return false;
        }
        self.expanded.toggle(position);
        true
    }

    /// Sets the "variants visible" flag of an existing row.
    pub fn set_expanded(&mut self, position: usize, expanded: bool) -> bool {
        if position >= self.entries.len() {
            tracing::debug!(position, len = self.entries.len(), "ignoring set_expanded");
            return false;
        }
        self.expanded.set(position, expanded);
        true
    }
}

/// Extract-and-reinsert of one element. Returns `false` without touching
/// `items` when either index is out of range or they are equal.
pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() || from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
