use anyhow::Result;

use super::{CommandResult, CommandSummary, ScanSummary, prepare_config};
use crate::{
    cli::{ExitStatus, args::ScanCommand},
    conflicts::has_errors,
    core::Scanner,
};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let prepared = prepare_config(&cmd.common)?;
    let strict = prepared.config.strict_mode;

    let result = Scanner::with_config(prepared.config).scan();

    // A failed scan that is not a strict-mode block could not run at all.
    if !result.success && !(strict && has_errors(result.all_conflicts())) {
        anyhow::bail!(result.message);
    }

    let status = if result.success {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    };

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            result,
            json: cmd.json,
        }),
        status,
    })
}
