use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an [`ActivityRecord`] was a submitted post or a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Post,
    Comment,
}

/// One post or comment extracted from an account's public activity page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub kind: RecordKind,
    /// Post title. Always empty for comments.
    pub title: String,
    pub body: String,
    /// Sub-community name without its `r/` prefix, or `"unknown"`.
    pub venue: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    /// Locally unique id such as `scraped_3` or `sample_1`.
    pub id: String,
}

impl ActivityRecord {
    /// Title plus body length in characters.
    #[must_use]
    pub fn content_length(&self) -> usize {
        self.title.chars().count() + self.body.chars().count()
    }
}

/// Outcome of one activity fetch for one identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    pub identifier: String,
    pub posts: Vec<ActivityRecord>,
    pub comments: Vec<ActivityRecord>,
    pub total_posts: usize,
    pub total_comments: usize,
    pub fetched_at: DateTime<Utc>,
}

impl FetchResult {
    /// Builds a result stamped with the current time, deriving the totals
    /// from the record sequences.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        posts: Vec<ActivityRecord>,
        comments: Vec<ActivityRecord>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            total_posts: posts.len(),
            total_comments: comments.len(),
            posts,
            comments,
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }

    /// Posts followed by comments, in extraction order.
    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.posts.iter().chain(self.comments.iter())
    }
}

/// Aggregate statistics derived from a [`FetchResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorSummary {
    /// Up to ten `(venue, count)` pairs, highest count first; ties keep
    /// first-seen order.
    pub top_venues: Vec<(String, usize)>,
    /// Mean of title + body length over posts, in characters.
    pub avg_post_length: f64,
    /// Mean body length over comments, in characters.
    pub avg_comment_length: f64,
    pub total_activity: usize,
    /// Posts divided by comments; `f64::INFINITY` when there are no comments.
    pub post_comment_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub traits: Vec<String>,
    pub communication_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    pub primary: String,
    pub secondary: String,
    pub long_term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frustrations {
    pub technology: String,
    pub community: String,
    pub personal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivations {
    pub intrinsic: String,
    pub extrinsic: String,
}

/// Synthesized persona. The serde field names are the wire schema the
/// generation service is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDescription {
    pub name: String,
    pub age: String,
    pub location: String,
    pub occupation: String,
    pub bio: String,
    pub personality: Personality,
    pub goals: Goals,
    pub frustrations: Frustrations,
    pub motivations: Motivations,
    pub brands: Vec<String>,
    pub quote: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: RecordKind, title: &str, body: &str) -> ActivityRecord {
        ActivityRecord {
            kind,
            title: title.to_string(),
            body: body.to_string(),
            venue: "rust".to_string(),
            score: 1,
            created_at: Utc::now(),
            id: "scraped_0".to_string(),
        }
    }

    #[test]
    fn fetch_result_derives_totals() {
        let result = FetchResult::new(
            "alice",
            vec![record(RecordKind::Post, "t", "")],
            vec![
                record(RecordKind::Comment, "", "first comment body"),
                record(RecordKind::Comment, "", "second comment body"),
            ],
        );
        assert_eq!(result.total_posts, 1);
        assert_eq!(result.total_comments, 2);
        assert!(!result.is_empty());
        assert_eq!(result.records().count(), 3);
    }

    #[test]
    fn content_length_counts_characters_not_bytes() {
        let r = record(RecordKind::Post, "héllo", "wörld");
        assert_eq!(r.content_length(), 10);
    }

    #[test]
    fn profile_description_requires_nested_objects() {
        let raw = serde_json::json!({
            "name": "n", "age": "a", "location": "l", "occupation": "o", "bio": "b",
            "personality": { "traits": ["x"], "communication_style": "c" },
            "goals": { "primary": "p", "secondary": "s", "long_term": "l" },
            "frustrations": { "technology": "t", "community": "c", "personal": "p" },
            "motivations": { "intrinsic": "i", "extrinsic": "e" },
            "brands": ["b1"],
            "quote": "q"
        });
        let parsed: ProfileDescription = serde_json::from_value(raw).expect("valid schema");
        assert_eq!(parsed.personality.traits, vec!["x".to_string()]);

        let missing_goals = serde_json::json!({ "name": "n" });
        assert!(serde_json::from_value::<ProfileDescription>(missing_goals).is_err());
    }

    #[test]
    fn record_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RecordKind::Comment).unwrap(),
            "\"comment\""
        );
    }
}
