//! Unseal CLI - Detect and strip C2PA provenance metadata from images.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use unseal_core::RemovalConfig;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success (cleaned, or nothing to remove)
  1   General error
  64  Usage error (invalid arguments)
  65  Removal failed or unsupported image data
  66  Input file or directory unreadable
  74  Output could not be written";

#[derive(Parser)]
#[command(name = "unseal")]
#[command(author, version, about = "Detect and remove C2PA metadata from JPEG and PNG images", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Suppress human-readable output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace); logs go to stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Removal knobs shared by `remove` and `filter`.
#[derive(Args, Debug, Clone, Copy)]
pub struct RemovalArgs {
    /// Skip decode/re-encode and go straight to selective copy
    #[arg(long)]
    no_smart: bool,

    /// JPEG quality used when re-encoding (1-100)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,
}

impl RemovalArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> RemovalConfig {
        let mut config = RemovalConfig::from_env();
        if self.no_smart {
            config = config.with_smart_mode(false);
        }
        if let Some(quality) = self.quality {
            config = config.with_jpeg_quality(quality);
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single image for C2PA metadata
    Check {
        /// Path to the image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove C2PA metadata from an image
    Remove {
        /// Path to the image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (defaults to <FILE>.cleaned.<ext>)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        removal: RemovalArgs,

        /// Show what would be done without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Check every JPEG and PNG directly inside a directory
    CheckDir {
        /// Directory to scan (not recursive)
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Print one JSON object per file, then a summary object
        #[arg(long)]
        json: bool,
    },

    /// Read an image from stdin and write the cleaned image to stdout
    Filter {
        #[command(flatten)]
        removal: RemovalArgs,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Check { file, json } => commands::check::execute(file, json, quiet),
        Commands::Remove {
            file,
            output,
            removal,
            dry_run,
        } => commands::remove::execute(file, output, removal.config(), dry_run, quiet),
        Commands::CheckDir { dir, json } => commands::check_dir::execute(dir, json, quiet),
        Commands::Filter { removal } => commands::filter::execute(removal.config()),
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            });
        }
    };

    init_tracing(cli.verbose);

    let exit = run(cli).unwrap_or_else(|err| ExitCode::from_anyhow(&err));
    if let Some(message) = &exit.message {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
    std::process::exit(exit.code);
}
