use anyhow::Result;

use super::{CommandResult, CommandSummary, GenerateSummary, prepare_config};
use crate::{
    cli::{ExitStatus, args::GenerateCommand},
    conflicts::has_errors,
    core::Scanner,
    generate::Generator,
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let prepared = prepare_config(&cmd.common)?;

    let mut config = prepared.config.clone();
    config.dry_run |= cmd.dry_run;
    if cmd.no_auto_fix {
        config.auto_fix = false;
    }
    if let Some(output) = &cmd.output {
        config.output_path = prepared.resolve(output);
    }
    if let Some(template) = &cmd.template {
        config.template_path = Some(prepared.resolve(template));
    }
    if cmd.source_date_epoch.is_some() {
        config.source_date_epoch = cmd.source_date_epoch;
    }

    let scanner = Scanner::with_config(config.clone());
    let scan = scanner.scan();

    let blocked = config.strict_mode && has_errors(scan.all_conflicts());
    if !scan.success && !blocked {
        anyhow::bail!(scan.message);
    }

    // Dry-run still renders so the blocking conflicts can be inspected.
    if blocked && !config.dry_run {
        return Ok(CommandResult {
            summary: CommandSummary::Generate(GenerateSummary {
                scan,
                generation: None,
            }),
            status: ExitStatus::Failure,
        });
    }

    let data = scanner.build_template_data(&scan);
    let generation = Generator::new(config).generate(&data);

    if !generation.success {
        anyhow::bail!(generation.message);
    }

    Ok(CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            scan,
            generation: Some(generation),
        }),
        status: ExitStatus::Success,
    })
}
