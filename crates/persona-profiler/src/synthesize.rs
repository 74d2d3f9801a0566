//! Persona synthesis with a deterministic fallback.

use persona_core::{
    BehaviorSummary, FetchResult, Frustrations, Goals, Motivations, Personality,
    ProfileDescription,
};

use crate::error::ProfilerError;
use crate::llm::GenerationClient;
use crate::prompt::build_prompt;

/// A synthesized persona and whether it came from the fallback template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    pub profile: ProfileDescription,
    /// `true` when the generation service was skipped or failed.
    pub degraded: bool,
}

/// Produces a persona for `activity`.
///
/// With a `generator`, sends the built prompt once and parses the reply
/// against the full schema. Without one, or on any transport, service or
/// parse failure, returns [`fallback_profile`] and marks the outcome as
/// degraded. Never fails.
pub async fn synthesize_profile(
    generator: Option<&GenerationClient>,
    activity: &FetchResult,
    summary: Option<&BehaviorSummary>,
) -> SynthesisOutcome {
    let identifier = activity.identifier.as_str();

    let Some(generator) = generator else {
        tracing::warn!(identifier, "no generation credential configured, using fallback persona");
        return degraded(identifier);
    };

    let prompt = build_prompt(activity, summary);
    tracing::info!(identifier, prompt_chars = prompt.len(), "requesting persona generation");

    let result = generator
        .complete(&prompt)
        .await
        .and_then(|reply| parse_profile_reply(&reply));

    match result {
        Ok(profile) => {
            tracing::info!(identifier, "persona generated");
            SynthesisOutcome {
                profile,
                degraded: false,
            }
        }
        Err(e) => {
            tracing::warn!(identifier, error = %e, "persona generation failed, using fallback persona");
            degraded(identifier)
        }
    }
}

fn degraded(identifier: &str) -> SynthesisOutcome {
    SynthesisOutcome {
        profile: fallback_profile(identifier),
        degraded: true,
    }
}

/// Parses a generation reply into a [`ProfileDescription`].
///
/// The reply must be a JSON object with every schema field present. A
/// Markdown code fence around the object is tolerated.
///
/// # Errors
///
/// Returns [`ProfilerError::Json`] if the reply is not valid JSON or misses
/// any field.
pub fn parse_profile_reply(reply: &str) -> Result<ProfileDescription, ProfilerError> {
    Ok(serde_json::from_str(strip_code_fence(reply))?)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// The fixed persona used when generation is unavailable. Depends only on
/// `identifier`.
#[must_use]
pub fn fallback_profile(identifier: &str) -> ProfileDescription {
    ProfileDescription {
        name: format!("Digital Explorer {identifier}"),
        age: "25-35".to_string(),
        location: "Unknown".to_string(),
        occupation: "Tech Professional".to_string(),
        bio: format!(
            "Active Reddit user {identifier} with diverse interests across multiple communities."
        ),
        personality: Personality {
            traits: vec![
                "curious".to_string(),
                "engaged".to_string(),
                "analytical".to_string(),
            ],
            communication_style: "Direct and informative".to_string(),
        },
        goals: Goals {
            primary: "Stay informed about interests".to_string(),
            secondary: "Engage with communities".to_string(),
            long_term: "Build knowledge and connections".to_string(),
        },
        frustrations: Frustrations {
            technology: "Platform limitations".to_string(),
            community: "Low quality discussions".to_string(),
            personal: "Information overload".to_string(),
        },
        motivations: Motivations {
            intrinsic: "Learning and growth".to_string(),
            extrinsic: "Community recognition".to_string(),
        },
        brands: vec![
            "Reddit".to_string(),
            "Tech Companies".to_string(),
            "Online Services".to_string(),
        ],
        quote: "Engaging with online communities to learn and share knowledge.".to_string(),
    }
}
