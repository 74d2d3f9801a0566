use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://old.reddit.com";
pub const DEFAULT_PROFILE_HOSTS: &str = "reddit.com,old.reddit.com,www.reddit.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("PERSONA_LOG_LEVEL", "info");
    let llm_api_key = optional("PERSONA_LLM_API_KEY");
    let llm_base_url = or_default("PERSONA_LLM_BASE_URL", DEFAULT_LLM_BASE_URL);
    let llm_model = or_default("PERSONA_LLM_MODEL", DEFAULT_LLM_MODEL);
    let llm_timeout_secs = parse_u64("PERSONA_LLM_TIMEOUT_SECS", "60")?;

    let profile_base_url = or_default("PERSONA_PROFILE_BASE_URL", DEFAULT_PROFILE_BASE_URL);
    let profile_hosts = parse_hosts(&or_default("PERSONA_PROFILE_HOSTS", DEFAULT_PROFILE_HOSTS));
    if profile_hosts.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PERSONA_PROFILE_HOSTS".to_string(),
            reason: "at least one host is required".to_string(),
        });
    }

    let fetch_timeout_secs = parse_u64("PERSONA_FETCH_TIMEOUT_SECS", "10")?;
    let fetch_delay_min_ms = parse_u64("PERSONA_FETCH_DELAY_MIN_MS", "2000")?;
    let fetch_delay_max_ms = parse_u64("PERSONA_FETCH_DELAY_MAX_MS", "4000")?;
    if fetch_delay_min_ms > fetch_delay_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "PERSONA_FETCH_DELAY_MIN_MS".to_string(),
            reason: format!(
                "minimum delay {fetch_delay_min_ms}ms exceeds maximum {fetch_delay_max_ms}ms"
            ),
        });
    }

    let output_dir = PathBuf::from(or_default("PERSONA_OUTPUT_DIR", "output"));
    let template_path = optional("PERSONA_TEMPLATE_PATH").map(PathBuf::from);
    let stylesheet_path = optional("PERSONA_STYLESHEET_PATH").map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        llm_api_key,
        llm_base_url,
        llm_model,
        llm_timeout_secs,
        profile_base_url,
        profile_hosts,
        fetch_timeout_secs,
        fetch_delay_min_ms,
        fetch_delay_max_ms,
        output_dir,
        template_path,
        stylesheet_path,
    })
}

/// Split a comma-separated host list, lower-casing and dropping blanks.
fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
