//! recsynth CLI
//!
//! Command-line interface for sampling synthetic record types.

#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]

use clap::{Parser, Subcommand};
use recsynth_cli::{
    SampleMode, format_summaries, list_names, load_settings, parse_output_format, sample_records,
    settings_to_yaml,
};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recsynth")]
#[command(about = "Synthetic record type generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate record types and print instances of them
    Sample {
        /// Number of records to print
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Nest exactly this many times instead of letting the engine choose
        /// (at most the configured max_depth)
        #[arg(long, conflicts_with = "simple")]
        depth: Option<u32>,

        /// Only flat records, no nesting
        #[arg(long)]
        simple: bool,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Settings file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use the CI profile regardless of the environment
        #[arg(long)]
        ci: bool,
    },

    /// Print the field name sequence
    Names {
        /// Number of names to print
        #[arg(short, long, default_value = "30")]
        count: usize,
    },

    /// Print the effective settings
    ShowConfig {
        /// Settings file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use the CI profile regardless of the environment
        #[arg(long)]
        ci: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the generated documents.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("recsynth=info"),
        1 => EnvFilter::new("recsynth=debug"),
        _ => EnvFilter::new("recsynth=trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sample {
            count,
            depth,
            simple,
            seed,
            format,
            config,
            ci,
        } => run_sample(count, SampleMode::from_flags(simple, depth), seed, &format, config, ci),
        Commands::Names { count } => run_names(count),
        Commands::ShowConfig { config, ci } => run_show_config(config, ci),
    }
}

fn run_sample(
    count: usize,
    mode: SampleMode,
    seed: u64,
    format: &str,
    config: Option<PathBuf>,
    ci: bool,
) {
    let format = match parse_output_format(format) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let settings = match load_settings(config.as_deref(), ci) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    info!(profile = %settings.profile, count, seed, mode = ?mode, "sampling records");

    let output = sample_records(settings, seed, count, mode)
        .and_then(|summaries| format_summaries(&summaries, format));
    match output {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_names(count: usize) {
    match list_names(count) {
        Ok(names) => {
            for name in names {
                println!("{name}");
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_show_config(config: Option<PathBuf>, ci: bool) {
    let yaml = load_settings(config.as_deref(), ci).and_then(|s| settings_to_yaml(&s));
    match yaml {
        Ok(yaml) => print!("{yaml}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
