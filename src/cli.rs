//! Command-line interface definitions for the feed aggregator.
//!
//! The aggregator is configured entirely through its YAML file; the only
//! runtime knob is where to find that file.

use clap::Parser;

/// Command-line arguments for the aggregator.
///
/// # Examples
///
/// ```sh
/// # Read ./config.yml from the working directory
/// longform_reads
///
/// # Point at a different configuration file
/// longform_reads --config /etc/longform_reads/config.yml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to the YAML configuration file (defaults to ./config.yml)
    #[arg(short, long)]
    pub config: Option<String>,
}
