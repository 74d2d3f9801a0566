use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use persona_core::load_app_config;
use persona_report::{generate_persona, PipelineContext};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "persona")]
#[command(about = "Generate a user persona report from a public profile's activity")]
struct Cli {
    /// Profile address, e.g. `https://www.reddit.com/user/alice/`.
    /// Prompted for on stdin when omitted.
    reference: Option<String>,

    /// Directory reports are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// HTML template with `{{key}}` placeholders.
    #[arg(long)]
    template: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(template) = cli.template {
        config.template_path = Some(template);
    }

    let reference = match cli.reference {
        Some(reference) => reference,
        None => prompt_reference()?,
    };
    if reference.trim().is_empty() {
        anyhow::bail!("no profile address given");
    }

    let ctx = PipelineContext::from_config(config)?;

    println!("Generating persona for {}...", reference.trim());
    let report = generate_persona(&ctx, &reference)
        .await
        .with_context(|| format!("failed to generate persona for {}", reference.trim()))?;

    if report.degraded {
        println!("Generation service unavailable; wrote a placeholder persona.");
    }
    println!(
        "Analyzed {} posts and {} comments for u/{}.",
        report.total_posts, report.total_comments, report.identifier
    );
    println!("Persona saved to {}", report.path.display());

    Ok(())
}

fn prompt_reference() -> anyhow::Result<String> {
    print!("Profile URL: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read profile address from stdin")?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests;
