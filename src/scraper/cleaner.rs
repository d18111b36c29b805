use crate::models::{ProductRecord, RawProductCard};
use crate::scraper::error::ExtractError;

// ── Page-locale literals (pt-BR storefront) ───────────────────────────────────

pub const NAME_UNAVAILABLE: &str = "Nome não disponível";
pub const PRICE_UNAVAILABLE: &str = "Valor não disponível";
pub const NO_SALES: &str = "0 vendidos";
pub const NO_RATING: &str = "Sem avaliação";

const DEFAULT_RATING: &str = "0";
const THOUSAND_MARKER: &str = "mil";
const CURRENCY_SYMBOL: &str = "R$";

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Parse a BRL price: drop the currency symbol and thousands dots, decimal comma → dot.
/// "R$ 1.234,56" → 1234.56 | "R$25,90" → 25.9
pub fn parse_price(s: &str) -> Result<f64, ExtractError> {
    let cleaned = s
        .replace(CURRENCY_SYMBOL, "")
        .replace('.', "")
        .replace(',', ".");
    cleaned
        .trim()
        .parse()
        .map_err(|_| ExtractError::InvalidPrice(s.to_string()))
}

/// Parse the sold counter, expanding the "mil" shorthand.
/// "1,2 mil vendidos" → 1200 | "1.5 mil" → 1500 | "87 vendidos" → 87
///
/// Shorthand values are truncated, not rounded.
pub fn parse_units_sold(s: &str) -> Result<u64, ExtractError> {
    if s.to_lowercase().contains(THOUSAND_MARKER) {
        let number: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .collect();
        let value: f64 = number
            .replace(',', ".")
            .parse()
            .map_err(|_| ExtractError::InvalidUnitsSold(s.to_string()))?;
        return Ok((value * 1000.0) as u64);
    }

    if s == NO_SALES {
        return Ok(0);
    }

    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse()
        .map_err(|_| ExtractError::InvalidUnitsSold(s.to_string()))
}

/// "4.9" → 4.9 | "Sem avaliação" → 0.0
pub fn parse_rating(s: &str) -> Result<f64, ExtractError> {
    if s == NO_RATING {
        return Ok(0.0);
    }
    s.trim()
        .parse()
        .map_err(|_| ExtractError::InvalidRating(s.to_string()))
}

/// Prefix relative hrefs with the storefront origin. Plain concatenation,
/// anything already starting with "http" is left alone.
pub fn normalise_link(href: &str, origin: &str) -> String {
    if href.is_empty() || href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", origin, href)
    }
}

// ── Raw card → ProductRecord ──────────────────────────────────────────────────

pub fn card_to_record(card: &RawProductCard, origin: &str) -> Result<ProductRecord, ExtractError> {
    let image = card.image.as_ref().ok_or(ExtractError::MissingImage)?;
    let name = image.alt.clone().unwrap_or_else(|| NAME_UNAVAILABLE.to_string());
    let image_url = image.src.clone().unwrap_or_default();

    let price = card.price.as_deref().map(parse_price).transpose()?;
    let units_sold = parse_units_sold(card.sold.as_deref().unwrap_or(NO_SALES))?;
    let rating = parse_rating(card.rating.as_deref().unwrap_or(DEFAULT_RATING))?;
    let link = normalise_link(card.href.as_deref().unwrap_or_default(), origin);

    Ok(ProductRecord {
        name,
        price,
        units_sold,
        rating,
        link,
        image_url,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
