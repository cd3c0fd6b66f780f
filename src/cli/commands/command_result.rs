use crate::{core::ScanResult, generate::GenerationResult};

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Generate(GenerateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub result: ScanResult,
    pub json: bool,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub scan: ScanResult,
    /// None when the scan already blocked generation.
    pub generation: Option<GenerationResult>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a resgen command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub status: ExitStatus,
}
