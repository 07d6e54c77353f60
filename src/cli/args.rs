//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translatable strings into a PO catalog
//! - `init`: Initialize potgen configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Output file (overrides `fileName` in config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prefix stripped from reference paths; `.` means the working directory
    #[arg(long)]
    pub base_directory: Option<String>,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Print the catalog to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract gettext calls from JS/TS sources into a PO catalog
    Extract(ExtractArgs),
    /// Initialize a new .potgenrc.json configuration file
    Init,
}
