use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("could not extract an identifier from reference \"{reference}\"")]
    InvalidReference { reference: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid profile base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
