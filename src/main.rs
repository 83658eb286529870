mod config;
mod display;
mod error;
mod generator;
mod parser;
mod schedule;
mod web;

use std::fs::File;
use std::path::PathBuf;

use log::{info, warn};

use config::PlannerConfig;
use display::{print_plan, write_plan_to_file};
use generator::{generate_catalog, write_catalog_csv, GeneratorConfig};
use parser::load_catalog;
use schedule::plan_attendance;

const GENERATE_USAGE: &str = "usage: fringe-planner generate <out.csv> [num_shows] [seed]";

/// Arguments of the `generate` subcommand
#[derive(Debug)]
struct GenerateArgs {
    out: PathBuf,
    generator_config: GeneratorConfig,
    seed: u64,
}

impl GenerateArgs {
    /// The output path is required so the configured catalog is never overwritten
    fn parse(args: &[String]) -> Result<Self, &'static str> {
        let out = args.first().map(PathBuf::from).ok_or(GENERATE_USAGE)?;
        let generator_config = GeneratorConfig {
            num_shows: args.get(1)
                .and_then(|n| n.parse().ok())
                .unwrap_or(GeneratorConfig::default().num_shows),
            ..GeneratorConfig::default()
        };
        let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2012);
        Ok(GenerateArgs { out, generator_config, seed })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PlannerConfig::from_env()?;
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("web") => {
            let port = args.get(2)
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(config.port);
            println!("Starting web server on port {}...", port);
            println!("POST a catalog to http://localhost:{}/api/plan", port);
            web::start_server(port, config.scheduler()).await?;
        }
        Some("generate") => {
            let GenerateArgs { out, generator_config, seed } = GenerateArgs::parse(&args[2..])?;
            let records = generate_catalog(&generator_config, seed);
            write_catalog_csv(&records, File::create(&out)?)?;
            println!("Wrote {} showings to {}", records.len(), out.display());
        }
        other => {
            let catalog_path = other.map(PathBuf::from).unwrap_or_else(|| config.catalog_path.clone());
            info!("Loading shows from {}", catalog_path.display());
            let catalog = load_catalog(&catalog_path)?;
            if catalog.is_empty() {
                warn!("{} contains no shows", catalog_path.display());
            }

            let plan = plan_attendance(catalog.into_shows(), config.scheduler());
            print_plan(&plan)?;

            write_plan_to_file(&plan, &config.report_path)?;
            println!("Plan saved to {}", config.report_path.display());
        }
    }

    Ok(())
}
