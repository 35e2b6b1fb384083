use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, catalog written
/// - `Failure` (1): Command refused to run (e.g. `init` over an existing config)
/// - `Error` (2): Command failed (bad config, missing source, unwritable catalog)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    /// Fatal error; the catalog may not have been written.
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
