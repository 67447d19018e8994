//! Ordered product list state for the discount editor.
//!
//! [`ProductList`] owns the rows and the [`ExpansionMap`] together so every
//! reorder, insert or removal realigns the map in the same `&mut self` call.
//! [`ListStore`] publishes copy-on-write snapshots of it, and
//! [`PickerSession`] drives catalog search and selection for one row.

pub mod expansion;
pub mod gesture;
pub mod list;
pub mod ops;
pub mod selection;
pub mod session;
pub mod store;
mod variants;

pub use expansion::ExpansionMap;
pub use gesture::{
    is_near_bottom, should_commit_move, DragGesture, HoverBounds, ScrollMetrics, VariantDrag,
};
pub use list::ProductList;
pub use ops::ListOp;
pub use selection::{CheckState, SelectedVariant, SelectionSet};
pub use session::{Commit, PageOutcome, PageRequest, PickerSession};
pub use store::ListStore;
