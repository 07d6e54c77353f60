//! Dispatches to the command handler for the parsed arguments.
//!
//! Handlers return `Ok(ExitStatus)` once they have run and reported, and
//! `Err` when the command fails (e.g., invalid config, unwritable output).

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(args)) => extract(&args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
