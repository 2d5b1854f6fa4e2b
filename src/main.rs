use anyhow::Context;
use clap::Parser;
use genre_rank::config::PipelineConfig;
use genre_rank::pipeline;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = PipelineConfig::parse();

    // The polars pool reads this once, on first use.
    unsafe {
        env::set_var("POLARS_MAX_THREADS", config.polars_threads.to_string());
    }

    let default_level = if config.verbose > 0 { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.verbose >= 2)
        .init();

    let thread_count = polars_core::POOL.current_num_threads();
    debug!("Polars is configured to use {thread_count} threads.");

    let summary = pipeline::run(&config).context("movie analysis failed")?;
    info!(
        "{} of {} records kept, {} genres ranked",
        summary.selected_records, summary.raw_records, summary.genres
    );
    Ok(())
}
