mod config;
mod launcher;
mod overrides;
mod sweep;

use crate::{
    config::SweeperConfig,
    launcher::Launchers,
    overrides::parse_overrides,
    sweep::TypeAliases,
};
use clap::Parser;
use std::{path::PathBuf, process::exit};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Generate and launch parameter sweeps over namespaced benchmark types"
)]
struct Arguments {
    /// path to a sweeper config with preset params and launcher selection
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// overrides of the form key=value or key=v1,v2,...
    /// an optional benchmark_type=t1,t2 argument selects the swept types
    arguments: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let arguments = Arguments::parse();

    let config = match arguments.config {
        Some(ref path) => match SweeperConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load sweeper config: {e}");
                exit(1);
            }
        },
        None => SweeperConfig::default(),
    };

    let benchmark_types = sweep::extract_benchmark_types(&arguments.arguments);
    info!("Running benchmark types: {benchmark_types:?}");

    // preset params go first so the command line keeps the last word downstream
    let mut raw_overrides = config.params_as_overrides();
    raw_overrides.extend(arguments.arguments.iter().cloned());

    let parsed = match parse_overrides(&raw_overrides) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Failed to parse overrides: {e}");
            exit(1);
        }
    };

    let aliases = TypeAliases::default();
    let combinations = sweep::sweep_combinations(&benchmark_types, &parsed, &aliases);

    info!("Generated {} total combinations", combinations.len());

    if combinations.is_empty() {
        return;
    }

    if let Err(e) = config.validate_batch(&combinations) {
        error!("Refusing to launch batch: {e}");
        exit(1);
    }

    let mut launcher = match Launchers::load(&config) {
        Ok(launcher) => launcher,
        Err(e) => {
            error!("Failed to load launcher: {e}");
            exit(1);
        }
    };

    match launcher.launch(combinations, 0) {
        Ok(returns) => info!("Done with {} jobs", returns.len()),
        Err(e) => {
            error!("Launcher failed: {e}");
            exit(1);
        }
    }
}
