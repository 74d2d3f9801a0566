//! Placeholder activity used when a fetch yields no records at all.

use chrono::{DateTime, Utc};
use persona_core::{ActivityRecord, RecordKind};

/// One fixed post and one fixed comment, stamped with `now`.
#[must_use]
pub fn synthetic_activity(now: DateTime<Utc>) -> (Vec<ActivityRecord>, Vec<ActivityRecord>) {
    let post = ActivityRecord {
        kind: RecordKind::Post,
        title: "Sample post about technology".to_string(),
        body: "This is a sample post content about technology trends.".to_string(),
        venue: "technology".to_string(),
        score: 100,
        created_at: now,
        id: "sample_1".to_string(),
    };
    let comment = ActivityRecord {
        kind: RecordKind::Comment,
        title: String::new(),
        body: "This is a sample comment about programming and development.".to_string(),
        venue: "programming".to_string(),
        score: 50,
        created_at: now,
        id: "sample_2".to_string(),
    };
    (vec![post], vec![comment])
}
