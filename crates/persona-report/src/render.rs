//! Placeholder substitution over the persona template.
//!
//! Templates use `{{key}}` placeholders. Values come from a flat key-value
//! record; text is HTML-escaped before it is inserted, list fields are
//! pre-rendered as tag spans.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use persona_profiler::SynthesisOutcome;
use regex::{Captures, Regex};

/// Built-in presentation template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/persona.html");

const DEGRADED_NOTICE: &str = "<p class=\"notice\">The generation service was unavailable, \
so this persona was filled from a generic template rather than derived from the account's activity.</p>";

/// Flattens a synthesis outcome into the template's key-value record.
///
/// Every value is ready for insertion as HTML.
#[must_use]
pub fn persona_fields<Tz>(
    identifier: &str,
    outcome: &SynthesisOutcome,
    generated_at: &DateTime<Tz>,
) -> HashMap<&'static str, String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let p = &outcome.profile;
    let text = |s: &str| html_escape::encode_text(s).into_owned();

    let mut fields = HashMap::new();
    fields.insert("username", text(identifier));
    fields.insert("name", text(&p.name));
    fields.insert("age", text(&p.age));
    fields.insert("location", text(&p.location));
    fields.insert("occupation", text(&p.occupation));
    fields.insert("bio", text(&p.bio));
    fields.insert("traits", tag_spans("trait-tag", &p.personality.traits));
    fields.insert(
        "communication_style",
        text(&p.personality.communication_style),
    );
    fields.insert("primary_goal", text(&p.goals.primary));
    fields.insert("secondary_goal", text(&p.goals.secondary));
    fields.insert("long_term_goal", text(&p.goals.long_term));
    fields.insert("tech_frustration", text(&p.frustrations.technology));
    fields.insert("community_frustration", text(&p.frustrations.community));
    fields.insert("personal_frustration", text(&p.frustrations.personal));
    fields.insert("intrinsic_motivation", text(&p.motivations.intrinsic));
    fields.insert("extrinsic_motivation", text(&p.motivations.extrinsic));
    fields.insert("brands", tag_spans("brand-tag", &p.brands));
    fields.insert("quote", text(&p.quote));
    fields.insert(
        "timestamp",
        generated_at.format("%B %d, %Y at %I:%M %p").to_string(),
    );
    fields.insert(
        "degraded_notice",
        if outcome.degraded {
            DEGRADED_NOTICE.to_string()
        } else {
            String::new()
        },
    );
    fields
}

fn tag_spans(class: &str, items: &[String]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "<span class=\"{class}\">{}</span>",
                html_escape::encode_text(item)
            )
        })
        .collect()
}

/// Replaces every `{{key}}` in `template` with its value from `fields`.
///
/// Substitution is single-pass, so inserted values are never re-expanded.
/// Unknown keys render as empty strings.
#[must_use]
pub fn render_document<S: std::hash::BuildHasher>(
    template: &str,
    fields: &HashMap<&'static str, String, S>,
) -> String {
    let placeholder =
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex");
    placeholder
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            fields.get(key).cloned().unwrap_or_else(|| {
                tracing::debug!(key, "template placeholder has no value");
                String::new()
            })
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use persona_profiler::fallback_profile;

    use super::*;

    fn outcome(degraded: bool) -> SynthesisOutcome {
        SynthesisOutcome {
            profile: fallback_profile("alice"),
            degraded,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 16, 37, 0).unwrap()
    }

    #[test]
    fn timestamp_is_human_readable() {
        let fields = persona_fields("alice", &outcome(false), &at());
        assert_eq!(fields["timestamp"], "October 18, 2026 at 04:37 PM");
    }

    #[test]
    fn list_fields_render_as_tags() {
        let fields = persona_fields("alice", &outcome(false), &at());
        assert_eq!(
            fields["traits"],
            "<span class=\"trait-tag\">curious</span><span class=\"trait-tag\">engaged</span><span class=\"trait-tag\">analytical</span>"
        );
        assert!(fields["brands"].contains("<span class=\"brand-tag\">Tech Companies</span>"));
    }

    #[test]
    fn text_values_are_escaped() {
        let mut outcome = outcome(false);
        outcome.profile.quote = "<script>alert(1)</script> & more".to_string();
        outcome.profile.brands = vec!["<b>".to_string()];
        let fields = persona_fields("alice", &outcome, &at());
        assert_eq!(
            fields["quote"],
            "&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"
        );
        assert_eq!(fields["brands"], "<span class=\"brand-tag\">&lt;b&gt;</span>");
    }

    #[test]
    fn degraded_notice_only_when_degraded() {
        assert!(persona_fields("alice", &outcome(false), &at())["degraded_notice"].is_empty());
        assert!(persona_fields("alice", &outcome(true), &at())["degraded_notice"]
            .contains("class=\"notice\""));
    }

    #[test]
    fn render_substitutes_known_and_blanks_unknown_keys() {
        let mut fields = HashMap::new();
        fields.insert("name", "Ada".to_string());
        fields.insert("quote", "{{name}}".to_string());
        let out = render_document("<h1>{{ name }}</h1><q>{{quote}}</q><i>{{missing}}</i>", &fields);
        assert_eq!(out, "<h1>Ada</h1><q>{{name}}</q><i></i>");
    }

    #[test]
    fn default_template_uses_every_field() {
        let fields = persona_fields("alice", &outcome(true), &at());
        for key in fields.keys() {
            assert!(
                DEFAULT_TEMPLATE.contains(&format!("{{{{{key}}}}}")),
                "template is missing placeholder {key}"
            );
        }
        let html = render_document(DEFAULT_TEMPLATE, &fields);
        assert!(!html.contains("{{"));
    }
}
