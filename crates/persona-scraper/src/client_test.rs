use chrono::TimeZone;
use persona_core::{ActivityRecord, RecordKind};

use super::*;

fn client(base: &str) -> ActivityClient {
    ActivityClient::new(base, 5, 0, 0).expect("valid test client")
}

#[test]
fn overview_url_appends_user_path() {
    assert_eq!(
        client("https://old.reddit.com").overview_url("alice").as_str(),
        "https://old.reddit.com/user/alice"
    );
}

#[test]
fn overview_url_tolerates_trailing_slash_and_prefix_path() {
    assert_eq!(
        client("https://old.reddit.com/").overview_url("bob").as_str(),
        "https://old.reddit.com/user/bob"
    );
    assert_eq!(
        client("http://localhost:8080/mirror/").overview_url("bob").as_str(),
        "http://localhost:8080/mirror/user/bob"
    );
}

#[test]
fn overview_url_percent_encodes_identifier() {
    assert_eq!(
        client("https://old.reddit.com").overview_url("a b#c").as_str(),
        "https://old.reddit.com/user/a%20b%23c"
    );
}

#[test]
fn pause_is_drawn_from_configured_range() {
    let fetcher = ActivityClient::new("https://old.reddit.com", 5, 100, 200).unwrap();
    for _ in 0..200 {
        let delay = fetcher.pause_duration();
        assert!(
            (Duration::from_millis(100)..=Duration::from_millis(200)).contains(&delay),
            "pause {delay:?} outside 100..=200ms"
        );
    }
}

#[test]
fn pause_with_equal_bounds_is_fixed() {
    let fetcher = ActivityClient::new("https://old.reddit.com", 5, 150, 150).unwrap();
    assert_eq!(fetcher.pause_duration(), Duration::from_millis(150));
    assert_eq!(client("https://old.reddit.com").pause_duration(), Duration::ZERO);
}

#[test]
fn inverted_pause_bounds_collapse_to_maximum() {
    let fetcher = ActivityClient::new("https://old.reddit.com", 5, 300, 100).unwrap();
    assert_eq!(fetcher.pause_duration(), Duration::from_millis(100));
}

#[test]
fn new_rejects_non_http_base() {
    for base in ["not a url", "mailto:someone@example.com", "ftp://example.com"] {
        assert!(
            matches!(
                ActivityClient::new(base, 5, 0, 0),
                Err(ScraperError::InvalidBaseUrl { .. })
            ),
            "base {base} should be rejected"
        );
    }
}

#[test]
fn finalize_substitutes_synthetic_records_when_nothing_was_extracted() {
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
    let result = finalize_activity("alice", ExtractedActivity::default(), at);

    assert_eq!(result.identifier, "alice");
    assert_eq!(result.total_posts, 1);
    assert_eq!(result.total_comments, 1);
    assert_eq!(result.posts[0].title, "Sample post about technology");
    assert_eq!(result.posts[0].venue, "technology");
    assert_eq!(result.posts[0].score, 100);
    assert_eq!(
        result.comments[0].body,
        "This is a sample comment about programming and development."
    );
    assert_eq!(result.comments[0].venue, "programming");
    assert_eq!(result.comments[0].score, 50);
    assert_eq!(result.fetched_at, at);
}

#[test]
fn finalize_keeps_real_records_even_if_only_one_kind_exists() {
    let at = Utc::now();
    let comment = ActivityRecord {
        kind: RecordKind::Comment,
        title: String::new(),
        body: "a real comment from the page".to_string(),
        venue: "rust".to_string(),
        score: 3,
        created_at: at,
        id: "scraped_0".to_string(),
    };
    let extracted = ExtractedActivity {
        posts: Vec::new(),
        comments: vec![comment.clone()],
        skipped: 0,
    };
    let result = finalize_activity("alice", extracted, at);
    assert!(result.posts.is_empty());
    assert_eq!(result.comments, vec![comment]);
    assert_eq!(result.total_posts, 0);
    assert_eq!(result.total_comments, 1);
}
