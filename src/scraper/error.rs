use thiserror::Error;

/// Why a single product node could not be turned into a record.
///
/// These never abort a page; the caller logs them and moves on to the next node.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no product image element")]
    MissingImage,

    #[error("unparseable price {0:?}")]
    InvalidPrice(String),

    #[error("unparseable units sold {0:?}")]
    InvalidUnitsSold(String),

    #[error("unparseable rating {0:?}")]
    InvalidRating(String),
}
