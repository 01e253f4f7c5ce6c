// SPDX-License-Identifier: MIT
//
// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// A lightweight full-screen line editor.
#[derive(Debug, Parser)]
#[command(name = "led", version, about)]
pub struct Cli {
    /// File to load at startup.
    pub file: Option<PathBuf>,

    /// Write diagnostics to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: Level,
}
