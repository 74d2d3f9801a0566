use std::path::PathBuf;

use persona_profiler::ProfilerError;
use persona_scraper::ScraperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),

    #[error(transparent)]
    Profiler(#[from] ProfilerError),

    #[error("could not read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// `true` when the run failed because the profile reference was not
    /// recognized.
    #[must_use]
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            ReportError::Scraper(ScraperError::InvalidReference { .. })
        )
    }
}
