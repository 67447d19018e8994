//! Observable copy-on-write holder for a [`ProductList`].
//!
//! Each [`ListStore::apply`] clones the current snapshot, applies one
//! operation to the clone and publishes it whole. Subscribers therefore only
//! ever see rows and expansion flags from the same step.

use std::sync::Arc;

use tokio::sync::watch;

use crate::list::ProductList;
use crate::ops::ListOp;

#[derive(Debug)]
pub struct ListStore {
    tx: watch::Sender<Arc<ProductList>>,
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new(ProductList::with_placeholder())
    }
}

impl ListStore {
    #[must_use]
    pub fn new(initial: ProductList) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// The current list. Cheap: clones an `Arc`.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ProductList> {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver that is notified after every published change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ProductList>> {
        self.tx.subscribe()
    }

    /// Applies `op` to a copy of the current list and publishes the copy if
    /// anything changed. Returns whether a new snapshot was published.
    pub fn apply(&mut self, op: ListOp) -> bool {
        let mut next = ProductList::clone(&self.snapshot());
        if !next.apply(op) {
            return false;
        }
        self.tx.send_replace(Arc::new(next));
        true
    }

    /// Applies a batch in order, publishing once at the end.
    pub fn apply_all(&mut self, ops: impl IntoIterator<Item = ListOp>) -> usize {
        let mut next = ProductList::clone(&self.snapshot());
        let mut changed = 0usize;
        for op in ops {
            if next.apply(op) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.tx.send_replace(Arc::new(next));
        }
        changed
    }
}
