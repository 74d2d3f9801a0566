//! Venue-frequency and content-length statistics.

use std::collections::HashMap;

use persona_core::{BehaviorSummary, FetchResult};

use crate::error::ProfilerError;

/// Number of venues kept in [`BehaviorSummary::top_venues`].
pub const TOP_VENUES: usize = 10;

/// Computes a [`BehaviorSummary`] over posts and comments.
///
/// Venues are counted by exact name in encounter order (posts first, then
/// comments) and ranked by count; equal counts keep first-seen order.
///
/// # Errors
///
/// Returns [`ProfilerError::EmptyDataset`] if there are neither posts nor
/// comments.
pub fn analyze_behavior(activity: &FetchResult) -> Result<BehaviorSummary, ProfilerError> {
    if activity.is_empty() {
        return Err(ProfilerError::EmptyDataset);
    }

    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in activity.records() {
        if let Some(&slot) = order.get(record.venue.as_str()) {
            counts[slot].1 += 1;
        } else {
            order.insert(record.venue.as_str(), counts.len());
            counts.push((record.venue.clone(), 1));
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_VENUES);

    let post_chars: usize = activity.posts.iter().map(|p| p.content_length()).sum();
    let comment_chars: usize = activity
        .comments
        .iter()
        .map(|c| c.body.chars().count())
        .sum();

    let posts = activity.posts.len();
    let comments = activity.comments.len();

    Ok(BehaviorSummary {
        top_venues: counts,
        avg_post_length: mean(post_chars, posts),
        avg_comment_length: mean(comment_chars, comments),
        total_activity: posts + comments,
        post_comment_ratio: if comments == 0 {
            f64::INFINITY
        } else {
            ratio(posts, comments)
        },
    })
}

fn mean(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        ratio(total, count)
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use persona_core::{ActivityRecord, RecordKind};

    use super::*;

    fn record(kind: RecordKind, venue: &str, title: &str, body: &str) -> ActivityRecord {
        ActivityRecord {
            kind,
            title: title.to_string(),
            body: body.to_string(),
            venue: venue.to_string(),
            score: 0,
            created_at: Utc::now(),
            id: "scraped_0".to_string(),
        }
    }

    fn posts(venues: &[&str]) -> Vec<ActivityRecord> {
        venues
            .iter()
            .map(|v| record(RecordKind::Post, v, "title", ""))
            .collect()
    }

    fn comments(venues: &[&str]) -> Vec<ActivityRecord> {
        venues
            .iter()
            .map(|v| record(RecordKind::Comment, v, "", "comment body"))
            .collect()
    }

    #[test]
    fn empty_dataset_is_reported() {
        let activity = FetchResult::new("alice", Vec::new(), Vec::new());
        assert!(matches!(
            analyze_behavior(&activity),
            Err(ProfilerError::EmptyDataset)
        ));
    }

    #[test]
    fn ratio_is_infinite_without_comments() {
        let activity = FetchResult::new("alice", posts(&["a", "b", "c"]), Vec::new());
        let summary = analyze_behavior(&activity).unwrap();
        assert!(summary.post_comment_ratio.is_infinite());
        assert!(summary.post_comment_ratio > 0.0);
        assert!(summary.avg_comment_length.abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_is_one_for_balanced_activity() {
        let activity = FetchResult::new("alice", posts(&["a", "b", "c"]), comments(&["a", "b", "c"]));
        let summary = analyze_behavior(&activity).unwrap();
        assert!((summary.post_comment_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_activity, 6);
    }

    #[test]
    fn top_venues_rank_by_count_then_first_seen() {
        let activity = FetchResult::new("alice", posts(&["a", "a", "b"]), comments(&["a", "c", "b"]));
        let summary = analyze_behavior(&activity).unwrap();
        assert_eq!(
            summary.top_venues,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let activity = FetchResult::new("alice", posts(&["z", "y"]), comments(&["x", "y", "z"]));
        let summary = analyze_behavior(&activity).unwrap();
        assert_eq!(
            summary.top_venues,
            vec![
                ("z".to_string(), 2),
                ("y".to_string(), 2),
                ("x".to_string(), 1)
            ]
        );
    }

    #[test]
    fn top_venues_are_capped_at_ten() {
        let names: Vec<String> = (0..15).map(|i| format!("venue{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let activity = FetchResult::new("alice", posts(&refs), Vec::new());
        let summary = analyze_behavior(&activity).unwrap();
        assert_eq!(summary.top_venues.len(), TOP_VENUES);
        assert_eq!(summary.top_venues[0].0, "venue0");
        assert_eq!(summary.top_venues[9].0, "venue9");
    }

    #[test]
    fn average_lengths_use_characters() {
        let activity = FetchResult::new(
            "alice",
            vec![
                record(RecordKind::Post, "a", "abcd", "ef"),
                record(RecordKind::Post, "a", "ab", ""),
            ],
            vec![record(RecordKind::Comment, "a", "", "ééééé")],
        );
        let summary = analyze_behavior(&activity).unwrap();
        assert!((summary.avg_post_length - 4.0).abs() < f64::EPSILON);
        assert!((summary.avg_comment_length - 5.0).abs() < f64::EPSILON);
    }
}
