//! Catalog search, paging and selection for one product row.
//!
//! The session never awaits while it is borrowed: it hands out
//! [`PageRequest`] tokens, the host fetches them (possibly several at once)
//! and feeds the results back through [`PickerSession::apply_page`]. Each
//! token carries the search generation it was issued under, so a page that
//! arrives after the search term changed is recognised and discarded.

use shelfpick_catalog::CatalogSearch;
use shelfpick_core::ProductEntry;

use crate::gesture::{is_near_bottom, ScrollMetrics};
use crate::ops::ListOp;
use crate::selection::{CheckState, SelectionSet};

/// One page fetch issued by a [`PickerSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    term: String,
    page: u32,
}

impl PageRequest {
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Fetches the page. Borrows only the catalog, so the session stays free
    /// to issue newer requests while this one is pending.
    pub async fn fetch<C>(&self, catalog: &C) -> Vec<ProductEntry>
    where
        C: CatalogSearch,
    {
        catalog.search(&self.term, self.page).await
    }
}

/// What happened to a page handed to [`PickerSession::apply_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Results were appended; `added` excludes products already listed.
    Appended { added: usize },
    /// The page was empty; no further pages will be requested for this term.
    EndOfResults,
    /// The request was superseded or already applied; results discarded.
    Stale,
}

/// The selection produced by a session, bound to the row it was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub target: usize,
    pub products: Vec<ProductEntry>,
}

impl From<Commit> for ListOp {
    fn from(commit: Commit) -> Self {
        ListOp::ReplaceAt {
            position: commit.target,
            products: commit.products,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PickerSession {
    target: usize,
    term: String,
    page: u32,
    generation: u64,
    results: Vec<ProductEntry>,
    in_flight: bool,
    exhausted: bool,
    selection: SelectionSet,
}

impl PickerSession {
    /// Opens a session for the row at `target` and returns the request for
    /// the first page of an empty search.
    #[must_use]
    pub fn open(target: usize) -> (Self, PageRequest) {
        let mut session = Self {
            target,
            term: String::new(),
            page: 1,
            generation: 0,
            results: Vec::new(),
            in_flight: false,
            exhausted: false,
            selection: SelectionSet::new(),
        };
        let request = session.restart(String::new());
        (session, request)
    }

    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn results(&self) -> &[ProductEntry] {
        &self.results
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// Switches to a new search term: back to page 1, accumulated results
    /// dropped, and every request issued before this call becomes stale.
    /// The selection is kept.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> PageRequest {
        self.restart(term.into())
    }

    /// Requests the following page, unless one is already in flight or the
    /// last page came back empty.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.in_flight || self.exhausted {
            tracing::trace!(
                in_flight = self.in_flight,
                exhausted = self.exhausted,
                "next page suppressed"
            );
            return None;
        }
        self.page += 1;
        self.in_flight = true;
        Some(self.request())
    }

    /// Scroll handler: requests the next page once the pane nears its end.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<PageRequest> {
        if is_near_bottom(metrics) {
            self.next_page()
        } else {
            None
        }
    }

    /// Feeds back the products fetched for `request`.
    pub fn apply_page(&mut self, request: &PageRequest, products: Vec<ProductEntry>) -> PageOutcome {
        if request.generation != self.generation || request.page != self.page || !self.in_flight
        {
            tracing::debug!(
                term = %request.term,
                page = request.page,
                current_term = %self.term,
                current_page = self.page,
                "discarding stale catalog page"
            );
            return PageOutcome::Stale;
        }
        self.in_flight = false;

        if products.is_empty() {
            self.exhausted = true;
            return PageOutcome::EndOfResults;
        }

        let mut added = 0;
        for product in products {
            if self.results.iter().any(|existing| existing.id == product.id) {
                tracing::debug!(product_id = %product.id, "skipping product already in results");
                continue;
            }
            self.results.push(product);
            added += 1;
        }
        PageOutcome::Appended { added }
    }

    /// Fetches `request` from `catalog` and applies it.
    ///
    /// Holds the session for the whole fetch; hosts that need to change the
    /// term mid-fetch use [`PageRequest::fetch`] and [`Self::apply_page`].
    pub async fn load<C>(&mut self, catalog: &C, request: PageRequest) -> PageOutcome
    where
        C: CatalogSearch,
    {
        let products = request.fetch(catalog).await;
        self.apply_page(&request, products)
    }

    /// Checkbox state of the result at `index`.
    #[must_use]
    pub fn result_state(&self, index: usize) -> Option<CheckState> {
        self.results
            .get(index)
            .map(|product| self.selection.check_state(product))
    }

    /// Toggles every variant of the result at `index`.
    pub fn toggle_result(&mut self, index: usize) -> bool {
        let Some(product) = self.results.get(index) else {
            return false;
        };
        self.selection.toggle_product(product);
        true
    }

    /// Toggles one variant of the result at `index`.
    pub fn toggle_result_variant(&mut self, index: usize, variant_index: usize) -> bool {
        let Some(product) = self.results.get(index) else {
            return false;
        };
        let Some(variant) = product.variants.get(variant_index) else {
            return false;
        };
        self.selection.toggle_variant(product, variant);
        true
    }

    /// Closes the session, grouping the selection into product rows for the
    /// target row.
    #[must_use]
    pub fn commit(self) -> Commit {
        Commit {
            target: self.target,
            products: self.selection.commit(),
        }
    }

    fn restart(&mut self, term: String) -> PageRequest {
        self.generation += 1;
        self.term = term;
        self.page = 1;
        self.results.clear();
        self.exhausted = false;
        self.in_flight = true;
        self.request()
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            generation: self.generation,
            term: self.term.clone(),
            page: self.page,
        }
    }
}
