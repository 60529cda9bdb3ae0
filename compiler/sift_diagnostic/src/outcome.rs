use std::process::ExitCode;

use crate::Report;

/// How a run ended, and the exit status that goes with it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// Nothing unchecked was found.
    Clean,
    /// At least one diagnostic was reported.
    Findings,
    /// Loading, configuration or I/O failed; no report was produced.
    Fatal,
}

impl Outcome {
    pub fn from_report(report: &Report) -> Self {
        if report.has_diagnostics() {
            Outcome::Findings
        } else {
            Outcome::Clean
        }
    }

    pub const fn exit_code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::Findings => 1,
            Outcome::Fatal => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

#[cfg(test)]
mod tests;
