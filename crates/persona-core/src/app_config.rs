use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub profile_base_url: String,
    pub profile_hosts: Vec<String>,
    pub fetch_timeout_secs: u64,
    pub fetch_delay_min_ms: u64,
    pub fetch_delay_max_ms: u64,
    pub output_dir: PathBuf,
    pub template_path: Option<PathBuf>,
    pub stylesheet_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "llm_api_key",
                &self.llm_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("profile_base_url", &self.profile_base_url)
            .field("profile_hosts", &self.profile_hosts)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("fetch_delay_min_ms", &self.fetch_delay_min_ms)
            .field("fetch_delay_max_ms", &self.fetch_delay_max_ms)
            .field("output_dir", &self.output_dir)
            .field("template_path", &self.template_path)
            .field("stylesheet_path", &self.stylesheet_path)
            .finish()
    }
}
