use serde::{Deserialize, Serialize};

// ── Product record ────────────────────────────────────────────────────────────

/// One normalised listing. Dedup identity is `name` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub price: Option<f64>,        // None when the page shows no price
    pub units_sold: u64,
    pub rating: f64,               // 0.0 when unrated
    pub link: String,
    pub image_url: String,
}

// ── Raw card (straight from the DOM) ──────────────────────────────────────────

/// Untouched strings pulled from one product node, before normalisation.
#[derive(Debug, Clone, Default)]
pub struct RawProductCard {
    /// Index of the node within its page, used in log lines.
    pub position: usize,
    pub image: Option<RawImage>,
    pub price: Option<String>,
    pub sold: Option<String>,
    pub rating: Option<String>,
    pub href: Option<String>,
}

/// The thumbnail `<img>` of a card. Its alt text doubles as the product name.
#[derive(Debug, Clone, Default)]
pub struct RawImage {
    pub alt: Option<String>,
    pub src: Option<String>,
}
