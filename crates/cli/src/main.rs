//! Data cache simulator CLI.
//!
//! This binary provides a single entry point for the analyzer. It performs:
//! 1. **Run:** Execute one benchmark kernel on one cache configuration and print its counters.
//! 2. **Sweep:** Execute a kernel across a family of configurations and print one row per point.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::Emulator;
use cachesim_core::common::{SimError, SimResult};
use cachesim_core::config::{Associativity, Config, ReplacementPolicy};
use cachesim_core::sim::{Suite, Workload};
use cachesim_core::stats::{STATS_SECTIONS, SUMMARY_HEADER};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Data cache simulator with 3C miss classification",
    long_about = "Run dot product and matrix multiply kernels against a configurable data cache.\n\nLogging goes to stderr and is controlled by RUST_LOG (e.g. RUST_LOG=cachesim_core=debug).\n\nExamples:\n  cachesim run mxm --assoc 4 --policy fifo\n  cachesim run dot --config cache.json --json\n  cachesim sweep assoc --workload mxm-blocking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one workload on one cache configuration.
    Run {
        /// Workload to run (dot, mxm, mxm-loop, mxm-blocking).
        #[arg(default_value = "dot")]
        workload: Workload,

        /// JSON configuration file; flags below override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cache capacity in KiB.
        #[arg(long)]
        size_kb: Option<usize>,

        /// Associativity: direct, full, or a way count.
        #[arg(short, long)]
        assoc: Option<Associativity>,

        /// Block size in bytes (multiple of 8).
        #[arg(short, long)]
        block_bytes: Option<usize>,

        /// Replacement policy (lru, fifo, random).
        #[arg(short, long)]
        policy: Option<ReplacementPolicy>,

        /// Seed for random replacement.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the counters as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Report sections to print (summary, reads, writes); all when omitted.
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,
    },

    /// Run one workload across a family of configurations.
    Sweep {
        /// Family to sweep (assoc, policy, block, size, loops).
        suite: Suite,

        /// Workload to run at each point; ignored by the loops suite.
        #[arg(short, long, default_value = "mxm")]
        workload: Workload,

        /// Print the points as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Flag overrides for `run`, applied on top of the loaded configuration.
#[derive(Debug, Default)]
struct Overrides {
    size_kb: Option<usize>,
    assoc: Option<Associativity>,
    block_bytes: Option<usize>,
    policy: Option<ReplacementPolicy>,
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            workload,
            config,
            size_kb,
            assoc,
            block_bytes,
            policy,
            seed,
            json,
            sections,
        } => {
            let overrides = Overrides {
                size_kb,
                assoc,
                block_bytes,
                policy,
                seed,
            };
            cmd_run(workload, config.as_deref(), &overrides, json, &sections)
        }
        Commands::Sweep {
            suite,
            workload,
            json,
        } => cmd_sweep(suite, workload, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Loads the configuration file (or defaults) and applies flag overrides.
fn load_config(path: Option<&Path>, overrides: &Overrides) -> SimResult<Config> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                SimError::Configuration(format!(
                    "cannot read {}: {e}",
                    path.display()
                ))
            })?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };

    if let Some(kb) = overrides.size_kb {
        config.cache.size_bytes = kb * 1024;
    }
    if let Some(assoc) = overrides.assoc {
        config.cache.associativity = assoc;
    }
    if let Some(bytes) = overrides.block_bytes {
        config.cache.block_bytes = bytes;
    }
    if let Some(policy) = overrides.policy {
        config.cache.policy = policy;
    }
    if let Some(seed) = overrides.seed {
        config.cache.seed = seed;
    }
    Ok(config)
}

/// Runs one workload and prints its counters.
fn cmd_run(
    workload: Workload,
    path: Option<&Path>,
    overrides: &Overrides,
    json: bool,
    sections: &[String],
) -> SimResult<()> {
    let config = load_config(path, overrides)?;
    for section in sections {
        if !STATS_SECTIONS.contains(&section.as_str()) {
            return Err(SimError::Parse {
                what: "stats section",
                input: section.clone(),
            });
        }
    }

    let mut emu = Emulator::new(&config)?;
    info!(%workload, geometry = %emu.geometry(), "starting run");
    workload.run(&mut emu)?;
    let stats = emu.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Workload: {workload}");
        println!("Cache:    {}", emu.geometry());
        println!();
        let sections: Vec<&str> = sections.iter().map(String::as_str).collect();
        stats.print_sections(&sections);
    }
    Ok(())
}

/// Runs a sweep suite and prints one row per configuration.
fn cmd_sweep(suite: Suite, workload: Workload, json: bool) -> SimResult<()> {
    info!(%suite, %workload, "starting sweep");
    let points = suite.run(workload)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        println!("[*] Sweep: {suite}");
        println!(
            "{:<13} {:>8} {:>17} {:>6} {:<6} | {SUMMARY_HEADER}",
            "workload", "size", "associativity", "block", "policy"
        );
        for point in &points {
            println!("{point}");
        }
    }
    Ok(())
}
