use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(author, version, about = "Browse a local video library over HTTP")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Media root, overriding the config file
    #[arg(short, long, global = true)]
    pub media_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (defaults to the config value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scan the media root and print the flat catalog
    Scan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a logical path such as /tv/Show/Season1 and print the listing
    Resolve {
        /// Logical path to resolve
        #[arg(required = true)]
        path: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
