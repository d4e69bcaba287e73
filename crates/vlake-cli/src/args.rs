//! Command-line argument definitions for the vlake CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the script to replay, output paths,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the vlake deduction tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the edit script to replay
    #[arg(help = "Path to the input script")]
    pub input: String,

    /// Path to the exported markup file
    #[arg(short, long, default_value = "out.tex")]
    pub output: String,

    /// Also render the final deduction to this SVG file
    #[arg(long)]
    pub svg: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
