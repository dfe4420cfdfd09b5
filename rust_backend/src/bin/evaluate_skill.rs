//! Skill evaluation command-line driver
//!
//! Tests a prediction set against an earthquake catalog, estimates its
//! predictive skill and prints the result as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! evaluate-skill catalog.csv predictions.json
//! evaluate-skill catalog.csv predictions.json skill.toml --tested-out tested.json
//! ```
//!
//! Without a config argument, `skill.toml` is looked up in the default
//! locations and the built-in defaults are used if none exists.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use quake_skill::algorithms::{calculate_skill, test_predictions, HitSummary};
use quake_skill::config::SkillConfig;
use quake_skill::io::{prediction_set_checksum, CatalogLoader, PredictionLoader};

const USAGE: &str =
    "usage: evaluate-skill <catalog.csv> <predictions.json> [config.toml] [--tested-out <path>]";

struct Args {
    catalog: PathBuf,
    predictions: PathBuf,
    config: Option<PathBuf>,
    tested_out: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut tested_out = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tested-out" => {
                let path = args.next().context("--tested-out requires a path")?;
                tested_out = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if !(2..=3).contains(&positional.len()) {
        bail!(USAGE);
    }
    let mut positional = positional.into_iter();
    Ok(Args {
        catalog: positional.next().context(USAGE)?,
        predictions: positional.next().context(USAGE)?,
        config: positional.next(),
        tested_out,
    })
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => SkillConfig::from_file(path)?,
        None => SkillConfig::from_default_location()?.unwrap_or_default(),
    };

    let catalog = CatalogLoader::load_from_file(&args.catalog)?;
    let predictions = PredictionLoader::load_from_file(&args.predictions)?;

    let tested = test_predictions(&predictions, &catalog, &config.hit_test);
    let summary = HitSummary::of(&tested);
    info!(
        "{} predictions tested: {} hits, {} misses",
        tested.len(),
        summary.hits,
        summary.misses
    );

    if let Some(path) = &args.tested_out {
        PredictionLoader::save_to_file(&tested, path)?;
        info!("Tested predictions written to {}", path.display());
    }

    let checksum = prediction_set_checksum(&tested)?;
    let report = calculate_skill(&tested, &config.skill)?;
    info!(
        "IR {:.3} (APP {:.3}, HR {:.3}), significance {:.1}%",
        report.information_ratio, report.average_probability, report.hit_rate, report.significance_pct
    );

    let output = json!({
        "checksum": checksum,
        "hits": summary.hits,
        "misses": summary.misses,
        "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
