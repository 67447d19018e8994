pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod rate_limit;
pub mod search;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::{normalize_page, normalize_product};
pub use search::CatalogSearch;
pub use types::{CatalogId, CatalogImage, CatalogPrice, CatalogProduct, CatalogVariant};
