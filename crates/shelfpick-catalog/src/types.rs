//! Response types for the catalog search endpoint.
//!
//! ## Observed shape
//!
//! The endpoint returns a bare JSON array of products, and `null` (not `[]`)
//! once the page number runs past the last result. Product and variant ids
//! are numbers; some mirrors of the endpoint return them as strings, so both
//! are accepted. Prices are usually decimal strings (`"12.99"`) but a number
//! is tolerated.
//!
//! `variants` and `image` may be absent or `null` on incomplete records; they
//! normalize to no variants and no image rather than failing the page.

use serde::Deserialize;

/// Numeric or string identifier as sent by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogId::Number(n) => write!(f, "{n}"),
            CatalogId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Variant price, string or number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CatalogPrice {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for CatalogPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogPrice::Text(s) => write!(f, "{s}"),
            CatalogPrice::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A single product from a search page.
#[derive(Debug, Deserialize)]
pub struct CatalogProduct {
    pub id: CatalogId,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub image: Option<CatalogImage>,

    /// `None` when the record omits the field or sends `null`.
    #[serde(default)]
    pub variants: Option<Vec<CatalogVariant>>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogVariant {
    pub id: CatalogId,

    #[serde(default)]
    pub product_id: Option<CatalogId>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub price: Option<CatalogPrice>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogImage {
    #[serde(default)]
    pub id: Option<CatalogId>,

    #[serde(default)]
    pub product_id: Option<CatalogId>,

    pub src: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_observed_product_shape() {
        let json = r#"[{
            "id": 77,
            "title": "Fog Linen Chambray Towel - Beige Stripe",
            "variants": [
                {"id": 1, "product_id": 77, "title": "XS / Silver", "price": "49"},
                {"id": 2, "product_id": 77, "title": "S / Silver", "price": "49"}
            ],
            "image": {"id": 266, "product_id": 77, "src": "https://cdn.example.com/77.jpg"}
        }]"#;
        let products: Vec<CatalogProduct> = serde_json::from_str(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, CatalogId::Number(77));
        assert_eq!(products[0].variants.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            products[0].image.as_ref().map(|i| i.src.as_str()),
            Some("https://cdn.example.com/77.jpg")
        );
    }

    #[test]
    fn null_page_parses_as_none() {
        let page: Option<Vec<CatalogProduct>> = serde_json::from_str("null").unwrap();
        assert!(page.is_none());
    }

    #[test]
    fn missing_variants_and_image_are_tolerated() {
        let product: CatalogProduct =
            serde_json::from_str(r#"{"id": "abc", "title": null, "variants": null}"#).unwrap();
        assert_eq!(product.id.to_string(), "abc");
        assert!(product.title.is_none());
        assert!(product.variants.is_none());
        assert!(product.image.is_none());
    }

    #[test]
    fn numeric_price_is_accepted() {
        let variant: CatalogVariant =
            serde_json::from_str(r#"{"id": 3, "title": "M", "price": 12.5}"#).unwrap();
        assert_eq!(variant.price.map(|p| p.to_string()).as_deref(), Some("12.5"));
    }
}
