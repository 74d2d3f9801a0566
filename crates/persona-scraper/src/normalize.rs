//! Fragment classification and conversion into [`ActivityRecord`]s.
//!
//! Extraction is best-effort: a fragment that cannot be classified is
//! skipped, and a fragment whose extraction fails is logged and skipped
//! without affecting the rest of the batch.

use chrono::{DateTime, Utc};
use persona_core::{ActivityRecord, RecordKind};

use crate::error::ScraperError;
use crate::markup::{MarkupDocument, MarkupFragment};
use crate::score::parse_score;

/// Upper bound on fragments examined per page.
pub const MAX_FRAGMENTS: usize = 50;

const FRAGMENT_SELECTOR: &str = "div.thing";
const UNKNOWN_VENUE: &str = "unknown";
const DEFAULT_TITLE: &str = "No title";
/// Comments at or below this many characters are discarded as noise.
const MIN_COMMENT_CHARS: usize = 10;

/// Records pulled from one page.
#[derive(Debug, Default)]
pub struct ExtractedActivity {
    pub posts: Vec<ActivityRecord>,
    pub comments: Vec<ActivityRecord>,
    /// Fragments that were unclassifiable, too short, or failed extraction.
    pub skipped: usize,
}

/// Splits `doc` into fragments and normalizes the first [`MAX_FRAGMENTS`].
///
/// `fetched_at` stamps records whose markup carries no usable timestamp.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] only if the fragment selector itself
/// cannot be evaluated; per-fragment failures are logged and skipped.
pub fn extract_records<D: MarkupDocument>(
    doc: &D,
    fetched_at: DateTime<Utc>,
) -> Result<ExtractedActivity, ScraperError> {
    let mut out = ExtractedActivity::default();

    for (position, fragment) in doc
        .find_fragments(FRAGMENT_SELECTOR)?
        .iter()
        .take(MAX_FRAGMENTS)
        .enumerate()
    {
        let outcome = classify(fragment).and_then(|kind| match kind {
            Some(RecordKind::Post) => {
                normalize_post(fragment, out.posts.len(), fetched_at).map(Some)
            }
            Some(RecordKind::Comment) => {
                normalize_comment(fragment, out.comments.len(), fetched_at)
            }
            None => Ok(None),
        });

        match outcome {
            Ok(Some(record)) => match record.kind {
                RecordKind::Post => out.posts.push(record),
                RecordKind::Comment => out.comments.push(record),
            },
            Ok(None) => out.skipped += 1,
            Err(e) => {
                tracing::warn!(position, error = %e, "failed to process activity fragment");
                out.skipped += 1;
            }
        }
    }

    tracing::debug!(
        posts = out.posts.len(),
        comments = out.comments.len(),
        skipped = out.skipped,
        "extracted activity records"
    );

    Ok(out)
}

/// Decides whether a fragment is a post or a comment.
///
/// Class markers are checked first (`link`, then `comment`). Without them,
/// a title link marks a post and a body block marks a comment. Post is
/// always checked before comment.
///
/// # Errors
///
/// Propagates selector failures from the markup implementation.
pub fn classify<F: MarkupFragment>(fragment: &F) -> Result<Option<RecordKind>, ScraperError> {
    if fragment.has_class("link") {
        return Ok(Some(RecordKind::Post));
    }
    if fragment.has_class("comment") {
        return Ok(Some(RecordKind::Comment));
    }
    if fragment.find_child("a.title")?.is_some() {
        return Ok(Some(RecordKind::Post));
    }
    if fragment.find_child("div.md")?.is_some() {
        return Ok(Some(RecordKind::Comment));
    }
    Ok(None)
}

fn normalize_post<F: MarkupFragment>(
    fragment: &F,
    index: usize,
    fetched_at: DateTime<Utc>,
) -> Result<ActivityRecord, ScraperError> {
    let title = fragment
        .find_child("a.title")?
        .map(|el| el.text_of())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let body = fragment
        .find_child("div.md")?
        .map(|el| el.text_of())
        .unwrap_or_default();

    Ok(ActivityRecord {
        kind: RecordKind::Post,
        title,
        body,
        venue: venue_of(fragment)?,
        score: score_of(fragment, "div.score")?,
        created_at: timestamp_of(fragment)?.unwrap_or(fetched_at),
        id: format!("scraped_{index}"),
    })
}

fn normalize_comment<F: MarkupFragment>(
    fragment: &F,
    index: usize,
    fetched_at: DateTime<Utc>,
) -> Result<Option<ActivityRecord>, ScraperError> {
    let Some(body) = fragment.find_child("div.md")?.map(|el| el.text_of()) else {
        return Ok(None);
    };
    if body.chars().count() <= MIN_COMMENT_CHARS {
        return Ok(None);
    }

    Ok(Some(ActivityRecord {
        kind: RecordKind::Comment,
        title: String::new(),
        body,
        venue: venue_of(fragment)?,
        score: score_of(fragment, "span.score")?,
        created_at: timestamp_of(fragment)?.unwrap_or(fetched_at),
        id: format!("scraped_{index}"),
    }))
}

/// Sub-community name with any leading `r/` removed, or `"unknown"`.
fn venue_of<F: MarkupFragment>(fragment: &F) -> Result<String, ScraperError> {
    let venue = fragment
        .find_child("a.subreddit")?
        .map(|el| el.text_of())
        .map(|text| {
            let trimmed = text.trim();
            trimmed
                .strip_prefix("r/")
                .or_else(|| trimmed.strip_prefix("/r/"))
                .unwrap_or(trimmed)
                .to_string()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_VENUE.to_string());
    Ok(venue)
}

/// Prefers the neutral `.unvoted` score element when the page renders
/// several vote states side by side.
fn score_of<F: MarkupFragment>(fragment: &F, selector: &str) -> Result<i64, ScraperError> {
    let element = match fragment.find_child(&format!("{selector}.unvoted"))? {
        Some(el) => Some(el),
        None => fragment.find_child(selector)?,
    };
    Ok(element.map_or(0, |el| parse_score(&el.text_of())))
}

fn timestamp_of<F: MarkupFragment>(fragment: &F) -> Result<Option<DateTime<Utc>>, ScraperError> {
    Ok(fragment
        .find_child("time")?
        .and_then(|el| el.attr("datetime"))
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
