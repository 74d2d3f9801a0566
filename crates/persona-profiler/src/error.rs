use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("no activity records available for analysis")]
    EmptyDataset,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("malformed generation reply: {0}")]
    MalformedReply(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
