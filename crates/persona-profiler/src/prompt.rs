//! Natural-language request construction for persona synthesis.

use persona_core::{BehaviorSummary, FetchResult};
use serde_json::{json, Value};

/// Role framing sent as the system message of every generation request.
pub const SYSTEM_PROMPT: &str =
    "You are an expert UX researcher. Create professional user personas. Return only valid JSON.";

const SAMPLE_POSTS: usize = 5;
const SAMPLE_COMMENTS: usize = 10;
const POST_BODY_CHARS: usize = 200;
const COMMENT_BODY_CHARS: usize = 150;

const RESPONSE_SCHEMA: &str = r#"{
    "name": "Professional persona name",
    "age": "Age range",
    "location": "Estimated location",
    "occupation": "Likely occupation",
    "bio": "2-3 sentence biography",
    "personality": {
        "traits": ["trait1", "trait2", "trait3"],
        "communication_style": "Communication description"
    },
    "goals": {
        "primary": "Main goal",
        "secondary": "Secondary goal",
        "long_term": "Long-term aspiration"
    },
    "frustrations": {
        "technology": "Tech frustration",
        "community": "Community frustration",
        "personal": "Personal frustration"
    },
    "motivations": {
        "intrinsic": "Internal motivation",
        "extrinsic": "External motivation"
    },
    "brands": ["brand1", "brand2", "brand3"],
    "quote": "Representative quote from their content"
}"#;

/// Builds the user message for a generation request.
///
/// Includes the identifier, totals, the top-venue ranking (or `no data`
/// when `summary` is absent), the first five posts and the first ten
/// comments, with bodies truncated to 200 and 150 characters.
#[must_use]
pub fn build_prompt(activity: &FetchResult, summary: Option<&BehaviorSummary>) -> String {
    let top_venues = summary.map_or_else(
        || "no data".to_string(),
        |s| {
            let pairs: Vec<String> = s
                .top_venues
                .iter()
                .map(|(venue, count)| format!("{}:{count}", json!(venue)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        },
    );

    let sample_posts: Vec<Value> = activity
        .posts
        .iter()
        .take(SAMPLE_POSTS)
        .map(|p| {
            json!({
                "title": p.title,
                "content": truncate_chars(&p.body, POST_BODY_CHARS),
                "subreddit": p.venue,
            })
        })
        .collect();

    let sample_comments: Vec<Value> = activity
        .comments
        .iter()
        .take(SAMPLE_COMMENTS)
        .map(|c| {
            json!({
                "content": truncate_chars(&c.body, COMMENT_BODY_CHARS),
                "subreddit": c.venue,
            })
        })
        .collect();

    format!(
        "Analyze this Reddit user's data and create a detailed user persona in professional UX research format.\n\n\
         USER: {user}\n\
         POSTS: {posts}\n\
         COMMENTS: {comments}\n\
         TOP SUBREDDITS: {top_venues}\n\n\
         SAMPLE POSTS:\n{sample_posts:#}\n\n\
         SAMPLE COMMENTS:\n{sample_comments:#}\n\n\
         Create a professional user persona in JSON format:\n{RESPONSE_SCHEMA}\n",
        user = activity.identifier,
        posts = activity.total_posts,
        comments = activity.total_comments,
        sample_posts = Value::Array(sample_posts),
        sample_comments = Value::Array(sample_comments),
    )
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
