// Command-line arguments.
// Global options configure the data source, cache location and API root.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::github::client::GITHUB_API_BASE;

/// folio - build a portfolio page with cached GitHub project metadata.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Portfolio data file (defaults to the bundled data)
    #[arg(long, global = true, env = "FOLIO_DATA")]
    pub data: Option<PathBuf>,

    /// Directory holding cached project metadata
    #[arg(long, global = true, env = "FOLIO_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// GitHub API root
    #[arg(long, global = true, env = "FOLIO_API_BASE", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Keep cached metadata in memory only for this run
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the portfolio page (default if no command specified)
    Build(BuildArgs),

    /// Print project metadata as JSON
    Fetch,

    /// Show the cache state of each configured project
    Cache,
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Output directory for index.html
    #[arg(short, long, default_value = "dist")]
    pub out: PathBuf,

    /// Pause after writing the skeleton page, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub skeleton_delay_ms: u64,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            out: PathBuf::from("dist"),
            skeleton_delay_ms: 100,
        }
    }
}
