use anyhow::Context;
use clap::Parser;
use http_bridge::bridge;
use http_bridge::model::SpectrumResponse;
use log::info;
use spectrumcore::processing::{Query, QueryOutcome};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use workflow::config::ServiceConfig;
use workflow::runner::Runner;

mod generator;
mod http_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Locate licensed spectrum allocations near a point")]
struct Args {
    /// Load service settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset of licence rows (.json array or .csv); overrides the config file
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Use this many synthetic rows instead of a dataset file
    #[arg(long)]
    generate: Option<usize>,
    /// Evaluate one query from the flags below and print the result
    #[arg(long, default_value_t = false)]
    query: bool,
    #[arg(long, default_value_t = -28.3, allow_negative_numbers = true)]
    latitude: f64,
    #[arg(long, default_value_t = 153.5, allow_negative_numbers = true)]
    longitude: f64,
    /// Search radius in km
    #[arg(long, default_value_t = 100.0)]
    radius: f64,
    #[arg(long, default_value_t = 1000.0)]
    min_freq: f64,
    #[arg(long, default_value_t = 90000.0)]
    max_freq: f64,
    /// Serve the HTTP API until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long)]
    bind: Option<SocketAddr>,
}

fn print_outcome(outcome: &QueryOutcome) -> anyhow::Result<()> {
    if outcome.is_empty() {
        println!("No data found for selected range");
        return Ok(());
    }

    println!(
        "Matched {} records in {} tiers",
        outcome.result.len(),
        outcome.result.tier_count()
    );
    for group in outcome.result.by_role() {
        println!("  {:<12} {}", group.label, group.entries.len());
    }
    if let Some(range) = outcome.display_range {
        println!("  display {:.3} .. {:.3} MHz", range.min_mhz, range.max_mhz);
    }

    let body = serde_json::to_string_pretty(&SpectrumResponse::from(outcome))
        .context("serializing query result")?;
    println!("{}", body);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let mut config = ServiceConfig::load(path)?;
            config.apply_overrides(args.dataset.clone(), args.generate, args.bind);
            config
        }
        None => ServiceConfig::from_args(args.dataset.clone(), args.generate, args.bind),
    };

    let runner = Runner::new(config.clone())?;

    if args.query {
        let query = Query::new(
            args.latitude,
            args.longitude,
            args.radius,
            args.min_freq,
            args.max_freq,
        )
        .context("validating query arguments")?;
        print_outcome(&runner.execute(&query))?;
    }

    if args.serve {
        bridge::serve(Arc::new(runner), config.bind)?;
    } else if !args.query {
        info!("nothing to do: pass --query for a one-shot lookup or --serve for the HTTP API");
    }

    Ok(())
}
