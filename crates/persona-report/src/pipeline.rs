//! End-to-end persona generation for a single profile reference.

use std::borrow::Cow;
use std::path::PathBuf;

use chrono::Local;
use persona_core::AppConfig;
use persona_profiler::{analyze_behavior, synthesize_profile, GenerationClient};
use persona_scraper::{ActivityClient, IdentifierExtractor};

use crate::error::ReportError;
use crate::render::{persona_fields, render_document, DEFAULT_TEMPLATE};
use crate::writer::{write_report, DEFAULT_STYLESHEET};

/// Clients and settings shared by every run.
pub struct PipelineContext {
    pub config: AppConfig,
    pub extractor: IdentifierExtractor,
    pub activity: ActivityClient,
    /// `None` when no generation credential is configured.
    pub generator: Option<GenerationClient>,
}

impl PipelineContext {
    /// Builds all clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Scraper`] for an unusable profile base URL and
    /// [`ReportError::Profiler`] if the generation client cannot be built.
    pub fn from_config(config: AppConfig) -> Result<Self, ReportError> {
        let extractor = IdentifierExtractor::new(config.profile_hosts.as_slice());
        let activity = ActivityClient::from_config(&config)?;
        let generator = GenerationClient::from_config(&config)?;
        Ok(Self {
            config,
            extractor,
            activity,
            generator,
        })
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PersonaReport {
    pub identifier: String,
    pub path: PathBuf,
    /// `true` when the persona came from the fallback template.
    pub degraded: bool,
    pub total_posts: usize,
    pub total_comments: usize,
}

/// Runs extract, fetch, aggregate, synthesize, render and write for
/// `reference`.
///
/// Fetch and synthesis failures degrade to placeholder data and never
/// abort the run.
///
/// # Errors
///
/// - [`ReportError::Scraper`] if `reference` is not a recognized profile
///   address. Nothing is fetched or written in that case.
/// - [`ReportError::Template`] if a configured template cannot be read.
/// - [`ReportError::Output`] if the report cannot be written.
pub async fn generate_persona(
    ctx: &PipelineContext,
    reference: &str,
) -> Result<PersonaReport, ReportError> {
    let identifier = ctx.extractor.extract(reference)?;
    tracing::info!(identifier = %identifier, "generating persona");

    let activity = ctx.activity.fetch_activity(&identifier).await;

    let summary = match analyze_behavior(&activity) {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::warn!(identifier = %identifier, error = %e, "behavior analysis skipped");
            None
        }
    };

    let outcome = synthesize_profile(ctx.generator.as_ref(), &activity, summary.as_ref()).await;

    let template = load_template(&ctx.config)?;
    let generated_at = Local::now();
    let fields = persona_fields(&identifier, &outcome, &generated_at);
    let html = render_document(&template, &fields);

    let stylesheet = load_stylesheet(&ctx.config);
    let path = write_report(
        &ctx.config.output_dir,
        &identifier,
        &generated_at,
        &html,
        &stylesheet,
    )?;

    tracing::info!(
        identifier = %identifier,
        path = %path.display(),
        degraded = outcome.degraded,
        posts = activity.total_posts,
        comments = activity.total_comments,
        "persona generated"
    );

    Ok(PersonaReport {
        identifier,
        path,
        degraded: outcome.degraded,
        total_posts: activity.total_posts,
        total_comments: activity.total_comments,
    })
}

fn load_template(config: &AppConfig) -> Result<Cow<'static, str>, ReportError> {
    match &config.template_path {
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| ReportError::Template {
                path: path.clone(),
                source,
            }),
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
    }
}

fn load_stylesheet(config: &AppConfig) -> Cow<'static, str> {
    let Some(path) = &config.stylesheet_path else {
        return Cow::Borrowed(DEFAULT_STYLESHEET);
    };
    match std::fs::read_to_string(path) {
        Ok(css) => Cow::Owned(css),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "stylesheet override unreadable, using built-in stylesheet"
            );
            Cow::Borrowed(DEFAULT_STYLESHEET)
        }
    }
}
