//! Public activity retrieval for a single account: reference parsing,
//! page fetch, fragment classification and record normalization.

pub mod client;
pub mod error;
pub mod identifier;
pub mod markup;
pub mod normalize;
pub mod score;
pub mod synthetic;

pub use client::ActivityClient;
pub use error::ScraperError;
pub use identifier::IdentifierExtractor;
pub use normalize::{extract_records, ExtractedActivity, MAX_FRAGMENTS};
pub use score::parse_score;
