use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): the pipeline ran and reported success
/// - `Failure` (1): the pipeline ran but reported failure (strict-mode abort)
/// - `Error` (2): the pipeline could not run (config, walk, parse or write error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
