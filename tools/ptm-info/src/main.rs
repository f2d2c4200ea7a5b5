//! PTM Info Tool
//!
//! A CLI tool for inspecting PolyTracker modules as the unified tracker
//! representation sees them.

mod cli;
mod config;
mod display;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use nether_ptm::{PtmDecoder, identify_module};
use nether_tracker::{
    IoStream, ModuleCapacity, NullSampleLoader, PcmSampleLoader, SampleLoader, TrackerModule,
};

use cli::{Cli, Commands};
use display::ModuleSummary;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    match cli.command {
        Commands::Probe { file } => {
            let data = read_file(&file)?;
            match identify_module(&data) {
                Some(tag) => println!("{}: {}", file.display(), tag),
                None => bail!("{}: not a PTM module", file.display()),
            }
        }
        Commands::Info { file, no_samples } => {
            let module = if no_samples {
                load_module(&file, config.capacity, &mut NullSampleLoader)?
            } else {
                load_module(&file, config.capacity, &mut PcmSampleLoader)?
            };
            print!("{}", display::render_info(&module));
        }
        Commands::Patterns { file, pattern } => {
            let module = load_module(&file, config.capacity, &mut NullSampleLoader)?;
            match pattern {
                Some(index) => {
                    let Some(data) = module.patterns.get(index) else {
                        bail!(
                            "Pattern {} out of range ({} patterns)",
                            index,
                            module.patterns.len()
                        );
                    };
                    print!("{}", display::render_pattern(index, data));
                }
                None => {
                    for (index, data) in module.patterns.iter().enumerate() {
                        println!("{}", display::render_pattern(index, data));
                    }
                }
            }
        }
        Commands::Json { file, pretty } => {
            let module = load_module(&file, config.capacity, &mut PcmSampleLoader)?;
            let summary = ModuleSummary::from_module(&module);
            let json = if pretty {
                serde_json::to_string_pretty(&summary)?
            } else {
                serde_json::to_string(&summary)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn load_module(
    path: &Path,
    capacity: ModuleCapacity,
    loader: &mut dyn SampleLoader,
) -> Result<TrackerModule> {
    let data = read_file(path)?;
    nether_ptm::probe(&data).with_context(|| format!("Not a PTM module: {}", path.display()))?;

    let mut module = TrackerModule::with_capacity(capacity);
    let mut stream = IoStream::from_slice(&data);
    PtmDecoder::new()
        .decode(&mut stream, &mut module, loader)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    tracing::info!(
        "Loaded '{}' ({} patterns, {} samples)",
        module.header.name,
        module.patterns.len(),
        module.samples.len()
    );
    Ok(module)
}
