//! Behavior statistics and persona synthesis over fetched activity.
//!
//! [`analyze_behavior`] reduces a [`persona_core::FetchResult`] to venue and
//! length statistics; [`synthesize_profile`] asks an OpenAI-compatible chat
//! endpoint for a structured persona and falls back to a fixed template when
//! the endpoint is unavailable or its reply does not fit the schema.

pub mod behavior;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod synthesize;

pub use behavior::analyze_behavior;
pub use error::ProfilerError;
pub use llm::GenerationClient;
pub use prompt::build_prompt;
pub use synthesize::{fallback_profile, parse_profile_reply, synthesize_profile, SynthesisOutcome};
