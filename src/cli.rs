use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{MAX_UPLOAD_RETRIES, UPLOAD_TIMEOUT_SECS};

/// Command-line arguments for the stackhaul tool.
#[derive(Parser, Debug)]
#[clap(
    name = "stackhaul",
    about = "Prepare and transfer digitized archival collections to OpenStack Swift"
)]
pub struct Args {
    /// Verbose logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a directory tree to a Swift container
    Upload(UploadOpts),

    /// Prune processed collection directories, keeping only .zip files
    /// and SimpleArchiveFormat packages
    Clean(CleanOpts),
}

/// Options for the upload subcommand.
#[derive(ClapArgs, Debug)]
pub struct UploadOpts {
    /// Local directory to upload
    pub source: PathBuf,

    /// Target container name
    #[clap(short, long)]
    pub container: String,

    /// Path to an openrc file with OS_* connection settings
    #[clap(long)]
    pub openrc: Option<PathBuf>,

    /// Override OS_USERNAME
    #[clap(short, long)]
    pub username: Option<String>,

    /// Maximum attempts per file
    #[clap(long, default_value_t = MAX_UPLOAD_RETRIES)]
    pub retries: u32,

    /// Per-file upload timeout in seconds
    #[clap(long, default_value_t = UPLOAD_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Swift CLI executable to invoke
    #[clap(long, default_value = crate::constants::DEFAULT_SWIFT_BIN)]
    pub swift_bin: String,

    /// Write a JSON run report to this path
    #[clap(long)]
    pub report: Option<PathBuf>,
}

/// Options for the clean subcommand.
#[derive(ClapArgs, Debug)]
pub struct CleanOpts {
    /// Collection base directory (year/month layout)
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Skip the confirmation prompt
    #[clap(short = 'y', long)]
    pub yes: bool,
}
