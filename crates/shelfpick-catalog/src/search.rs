//! The read-only catalog contract the picker depends on.

use std::future::Future;

use shelfpick_core::ProductEntry;

use crate::client::CatalogClient;

/// A paged, side-effect-free product search.
///
/// Implementations never fail: errors are reported as an empty page, which
/// the picker reads as "no more results".
pub trait CatalogSearch {
    /// Returns page `page` (1-based) of products matching `term`, possibly empty.
    fn search(&self, term: &str, page: u32) -> impl Future<Output = Vec<ProductEntry>> + Send;
}

impl CatalogSearch for CatalogClient {
    async fn search(&self, term: &str, page: u32) -> Vec<ProductEntry> {
        match self.search_page(term, page).await {
            Ok(products) => {
                tracing::debug!(term, page, count = products.len(), "catalog page fetched");
                products
            }
            Err(error) => {
                tracing::warn!(term, page, %error, "catalog search failed, treating as empty page");
                Vec::new()
            }
        }
    }
}
