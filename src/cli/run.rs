use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, generate::generate, init::init, scan::scan},
};

/// Dispatch to the command handler.
///
/// Returns `Err` when the command could not run (config, walk, parse or
/// write error); a completed run reports its outcome in the result.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
