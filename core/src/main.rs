use clap::Parser;
use ctsort_core::cli::{Cli, OutputFormat};
use ctsort_core::{discover_datasets, ArrangeReport, Arranger, TextReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = cli.to_config();

    if !config.input_root.is_dir() {
        eprintln!("Error: {} is not a directory", config.input_root.display());
        process::exit(1);
    }

    let datasets = match discover_datasets(&config.input_root) {
        Ok(datasets) => datasets,
        Err(e) => {
            error!("Failed to read input root: {}", e);
            eprintln!("Error: Failed to read input root: {}", e);
            process::exit(1);
        }
    };

    if datasets.is_empty() {
        eprintln!(
            "Error: No datasets found in {}",
            config.input_root.display()
        );
        process::exit(1);
    }

    info!("Found {} dataset(s): {:?}", datasets.len(), datasets);
    info!("Using rule set: {}", config.rule_set);

    let arranger = Arranger::new(config);
    let report = match arranger.arrange_all() {
        Ok(report) => report,
        Err(e) => {
            error!("Arranging failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    output_report(&report, cli.format);

    if !report.is_success() {
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn output_report(report: &ArrangeReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(report));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
