//! Pointer-gesture decisions, kept free of any rendering so they can be
//! tested on numbers alone.

use crate::ops::ListOp;

/// Scroll distance from the bottom, in pixels, that counts as "near the end".
pub const NEAR_BOTTOM_THRESHOLD_PX: f64 = 10.0;

/// Vertical bounds of the row currently under the pointer, in client
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverBounds {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

/// Whether hovering the row at `hover_index` with the pointer at `pointer_y`
/// should move the dragged row there.
///
/// Moving down only commits once the pointer passes the hovered row's
/// midpoint; moving up only once it is above the midpoint. This stops rows
/// from flickering back and forth while the pointer sits on a boundary.
#[must_use]
pub fn should_commit_move(
    drag_index: usize,
    hover_index: usize,
    pointer_y: f64,
    bounds: HoverBounds,
) -> bool {
    if drag_index == hover_index {
        return false;
    }
    let hover_middle_y = (bounds.bottom - bounds.top) / 2.0;
    let hover_client_y = pointer_y - bounds.top;
    if drag_index < hover_index && hover_client_y < hover_middle_y {
        return false;
    }
    if drag_index > hover_index && hover_client_y > hover_middle_y {
        return false;
    }
    true
}

/// Whether a results pane is scrolled close enough to its end to load the
/// next page.
#[must_use]
pub fn is_near_bottom(metrics: ScrollMetrics) -> bool {
    metrics.scroll_top + metrics.client_height >= metrics.scroll_height - NEAR_BOTTOM_THRESHOLD_PX
}

/// An in-progress drag of a product row. Tracks where the row currently is,
/// since every committed hover moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    index: usize,
}

impl DragGesture {
    #[must_use]
    pub fn start(index: usize) -> Self {
        Self { index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the move to apply for this hover, if any.
    pub fn hover(&mut self, hover_index: usize, pointer_y: f64, bounds: HoverBounds) -> Option<ListOp> {
        if !should_commit_move(self.index, hover_index, pointer_y, bounds) {
            return None;
        }
        let op = ListOp::MoveEntry {
            from: self.index,
            to: hover_index,
        };
        self.index = hover_index;
        Some(op)
    }
}

/// An in-progress drag of a variant inside one product row. Hovering a
/// variant of a different product does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDrag {
    product: usize,
    index: usize,
}

impl VariantDrag {
    #[must_use]
    pub fn start(product: usize, index: usize) -> Self {
        Self { product, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn hover(
        &mut self,
        hover_product: usize,
        hover_index: usize,
        pointer_y: f64,
        bounds: HoverBounds,
    ) -> Option<ListOp> {
        if hover_product != self.product
            || !should_commit_move(self.index, hover_index, pointer_y, bounds)
        {
            return None;
        }
        let op = ListOp::MoveVariant {
            product: self.product,
            from: self.index,
            to: hover_index,
        };
        self.index = hover_index;
        Some(op)
    }
}
