//! Command line argument parsing for the tesauro CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::BuildConfig;
use crate::error::Result;

/// Tesauro - medical abbreviation thesaurus and query expansion
#[derive(Parser, Debug, Clone)]
#[command(name = "tesauro")]
#[command(about = "Build a medical abbreviation thesaurus and expand search terms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TesauroArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Build configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "TESAURO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the source and output files
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TesauroArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    /// The build configuration: the config file if given, defaults otherwise,
    /// with `--base-dir` applied last.
    pub fn build_config(&self) -> Result<BuildConfig> {
        let config = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::default(),
        };
        Ok(match &self.base_dir {
            Some(base_dir) => config.with_base_dir(base_dir),
            None => config,
        })
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate the canonical dictionary from the abbreviation list
    Siglas(SiglasArgs),

    /// Cluster the sources into the concept map
    Build(BuildArgs),

    /// Build the inverted index from the concept map
    Index(IndexArgs),

    /// Expand search terms into boolean queries
    Expand(ExpandArgs),

    /// Show statistics about the persisted structures
    Stats(StatsArgs),

    /// Move questionable optometry CSV rows into the review file
    #[command(name = "refine-csv")]
    RefineCsv(RefineCsvArgs),
}

/// Arguments for generating the canonical dictionary
#[derive(Parser, Debug, Clone)]
pub struct SiglasArgs {
    /// Abbreviation list (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output dictionary (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for building the concept map
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Also build and save the inverted index
    #[arg(long)]
    pub with_index: bool,
}

/// Arguments for building the inverted index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {}

/// Arguments for expanding terms
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Terms to expand
    #[arg(value_name = "TERM", required = true)]
    pub terms: Vec<String>,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// List every ambiguous term
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for refining the optometry CSV
#[derive(Parser, Debug, Clone)]
pub struct RefineCsvArgs {
    /// Report what would be flagged without rewriting any file
    #[arg(long)]
    pub dry_run: bool,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
