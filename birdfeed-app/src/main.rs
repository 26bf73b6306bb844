use anyhow::Result;
use birdfeed_common::BirdfeedError;
use birdfeed_common::observability::init_logging;
use birdfeed_pipeline::render::render_atom;
use birdfeed_pipeline::{SourceOutcome, run_pipeline};
use chrono::Utc;
use clap::Parser;
use cli::Cli;
use std::io::Write;

mod cli;
mod tether;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        let code = err
            .downcast_ref::<BirdfeedError>()
            .map_or(1, BirdfeedError::exit_code);
        tracing::error!(error = %err, "run failed");
        eprintln!("birdfeed: {err:#}");
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let started = Utc::now();

    // 1) Invocation checks come before anything else
    let name = tether::feed_name(&cli)?;

    // 2) Config (env wins), then logging as configured
    let cfg = tether::load_config(&cli)?;
    // logging failures are reported, never fatal
    match init_logging(tether::log_config(&cli, &cfg.logging)) {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "logging initialised"),
        Ok(None) => tracing::debug!("logging to stderr"),
        Err(err) => eprintln!("birdfeed: logging disabled: {err:#}"),
    }

    let request = tether::feed_request(
        name,
        &cli,
        &cfg.defaults,
        cfg.twitter.screen_name.as_deref(),
    )?;
    let upstream = tether::build_upstream(&cfg.twitter)?;

    let run = run_pipeline(upstream, &request).await?;
    for source in &run.report.sources {
        if let SourceOutcome::Degraded { reason } = &source.outcome {
            tracing::warn!(source = %source.source, %reason, "source contributed nothing");
        }
    }

    let xml = render_atom(&run.document, started)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(xml.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
