#![forbid(unsafe_code)]

mod config;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use pssl_translate::{integration_notes, ArtifactStatus, DirectorySink};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> Result<ExitCode> {
    let config = Config::load()?;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let pair = config.shader_pair()?;
    let out_dir = &config.out_dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let mut sink = DirectorySink::new(out_dir);
    let report = pssl_translate::run(&pair, &config.options, &mut sink)
        .with_context(|| format!("failed to translate shader `{}`", pair.name))?;
    tracing::debug!(
        location = %report.session.output_location(),
        diagnostics = report.diagnostics.len(),
        "translation finished"
    );

    for outcome in &report.outcomes {
        let path = sink.root().join(&outcome.file_name);
        match &outcome.status {
            ArtifactStatus::Written => println!("wrote {}", path.display()),
            ArtifactStatus::Failed(err) => println!("failed {}: {}", path.display(), err.source),
            ArtifactStatus::Skipped { missing_header } => {
                println!("skipped {} (missing {missing_header})", path.display())
            }
        }
    }

    if !report.is_complete() {
        return Ok(ExitCode::FAILURE);
    }

    println!();
    println!("Remaining manual steps:");
    for (i, note) in integration_notes().iter().enumerate() {
        println!("  {}. {note}", i + 1);
    }
    Ok(ExitCode::SUCCESS)
}
