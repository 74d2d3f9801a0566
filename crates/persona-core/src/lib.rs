//! Shared data model and configuration for the persona generator.

pub mod app_config;
pub mod config;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    ActivityRecord, BehaviorSummary, FetchResult, Frustrations, Goals, Motivations, Personality,
    ProfileDescription, RecordKind,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
