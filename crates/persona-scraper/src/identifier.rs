//! Profile reference parsing.
//!
//! A reference such as `https://www.reddit.com/user/alice/comments` is
//! lower-cased and matched against `<host>/user/<id>` and `<host>/u/<id>`
//! for every recognized host, in order. The first capture wins.

use regex::Regex;

use crate::error::ScraperError;

/// Compiled address shapes for a fixed list of recognized hosts.
#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    patterns: Vec<Regex>,
}

impl IdentifierExtractor {
    /// Builds the ordered pattern list for `hosts`.
    #[must_use]
    pub fn new<S: AsRef<str>>(hosts: &[S]) -> Self {
        let patterns = hosts
            .iter()
            .flat_map(|host| {
                let host = regex::escape(&host.as_ref().to_lowercase());
                ["user", "u"].map(|segment| {
                    Regex::new(&format!(r"{host}/{segment}/([^/?]+)"))
                        .expect("escaped host produces a valid pattern")
                })
            })
            .collect();
        Self { patterns }
    }

    /// Returns the lower-cased identifier captured from `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidReference`] when no recognized shape
    /// matches.
    pub fn extract(&self, reference: &str) -> Result<String, ScraperError> {
        let lower = reference.trim().to_lowercase();
        self.patterns
            .iter()
            .find_map(|re| {
                re.captures(&lower)
                    .and_then(|cap| cap.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .ok_or_else(|| ScraperError::InvalidReference {
                reference: reference.to_string(),
            })
    }
}
