//! Command handlers for the CLI.
//!
//! Results go to stdout as pretty JSON; logs go to stderr.

use std::path::Path;

use anyhow::Context;
use shelfpick_catalog::{CatalogClient, CatalogSearch};
use shelfpick_core::AppConfig;
use shelfpick_list::{ListOp, ListStore, PageOutcome, PickerSession, ProductList};

fn build_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}

/// Fetch one page and print it.
///
/// Unlike the picker, this surfaces catalog errors instead of treating them
/// as an empty page.
pub(crate) async fn run_search(config: &AppConfig, term: &str, page: u32) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let products = client
        .search_page(term, page)
        .await
        .with_context(|| format!("catalog search for '{term}' page {page} failed"))?;
    println!("{}", serde_json::to_string_pretty(&products)?);
    Ok(())
}

/// Run a picker session against the live catalog and commit the chosen
/// products into row 0 of a fresh list.
pub(crate) async fn run_pick(
    config: &AppConfig,
    term: &str,
    pages: u32,
    product_ids: &[String],
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let session = pick_products(&client, term, pages, product_ids).await;

    let mut store = ListStore::default();
    let commit = session.commit();
    if commit.products.is_empty() {
        tracing::warn!("nothing selected; list left with its placeholder row");
    } else {
        store.apply(ListOp::from(commit));
    }
    println!("{}", serde_json::to_string_pretty(&*store.snapshot())?);
    Ok(())
}

/// Loads up to `pages` result pages for `term`, then selects every variant
/// of each product in `product_ids` that turned up.
pub(crate) async fn pick_products<C>(
    catalog: &C,
    term: &str,
    pages: u32,
    product_ids: &[String],
) -> PickerSession
where
    C: CatalogSearch,
{
    let (mut session, first) = PickerSession::open(0);
    let mut request = if term.is_empty() {
        first
    } else {
        session.set_search_term(term)
    };

    let pages = pages.max(1);
    loop {
        let page = request.page();
        if session.load(catalog, request).await == PageOutcome::EndOfResults {
            tracing::info!(term, page, "no more results");
            break;
        }
        if page >= pages {
            break;
        }
        match session.next_page() {
            Some(next) => request = next,
            None => break,
        }
    }

    for id in product_ids {
        match session.results().iter().position(|p| &p.id == id) {
            Some(index) => {
                session.toggle_result(index);
            }
            None => tracing::warn!(product_id = %id, "product not found in loaded results"),
        }
    }
    session
}

/// Read a script file and print the resulting list.
pub(crate) fn run_apply(script: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let list = apply_script(&raw)?;
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

/// Parses a JSON array of list operations and applies them, in order, to a
/// list holding a single placeholder row.
pub(crate) fn apply_script(raw: &str) -> anyhow::Result<ProductList> {
    let ops: Vec<ListOp> =
        serde_json::from_str(raw).context("script must be a JSON array of list operations")?;
    let total = ops.len();

    let mut store = ListStore::default();
    let changed = store.apply_all(ops);
    tracing::info!(total, changed, "script applied");

    Ok(ProductList::clone(&store.snapshot()))
}
