//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ambry - bucket/file object storage with on-read transforms
#[derive(Parser, Debug)]
#[command(name = "ambry")]
#[command(about = "Bucket/file object storage with on-read transforms", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List buckets
    Buckets {
        /// Backend to list
        #[arg(long, default_value = "default")]
        backend: String,

        /// Number of buckets to skip
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Maximum number of buckets to display
        #[arg(long, default_value_t = ambry::DEFAULT_LIST_LIMIT)]
        limit: usize,
    },

    /// Create a bucket
    Mkbucket {
        /// Bucket name
        bucket: String,
    },

    /// Delete a bucket and everything in it
    Rmbucket {
        /// Bucket name
        bucket: String,
    },

    /// List files in a bucket
    Files {
        /// Bucket name
        bucket: String,

        /// Number of files to skip
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Maximum number of files to display
        #[arg(long, default_value_t = ambry::DEFAULT_LIST_LIMIT)]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: ListFormat,
    },

    /// Show file metadata
    Stat {
        /// Bucket name
        bucket: String,
        /// File path inside the bucket
        file: String,
    },

    /// Upload a local file
    Put {
        /// Bucket name
        bucket: String,
        /// File path inside the bucket
        file: String,
        /// Local source file (stdin when omitted)
        #[arg(long)]
        source: Option<PathBuf>,
    },

    /// Download a file, optionally through a transform
    Get {
        /// Bucket name
        bucket: String,
        /// File path inside the bucket
        file: String,
        /// Local destination file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Name of a configured transform to apply
        #[arg(long)]
        transform: Option<String>,
    },

    /// Delete a file
    Rm {
        /// Bucket name
        bucket: String,
        /// File path inside the bucket
        file: String,
    },

    /// Print transform configuration schemas as JSON
    Transforms,
}

/// Listing output formats
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ListFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
