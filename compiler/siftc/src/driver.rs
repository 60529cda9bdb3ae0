//! One errsift run, from arguments to exit status.

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use sift_check::{analyze, ExcludeFileError, LoadError};
use sift_diagnostic::{DiagnosticEmitter, JsonEmitter, Outcome, Report, TextEmitter};

use crate::cli::{parse_args, CliError, Format, Options, USAGE};
use crate::loader::JsonProgramLoader;

/// Why a run stopped before producing a report.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Exclude(#[from] ExcludeFileError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("no program to check: pass -program <dump.json>")]
    NoProgram,
}

/// Run errsift with `args` (program name excluded).
///
/// The report goes to `out`; usage, fatal errors and notes about packages
/// without source files go to `err`.
pub fn run(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Outcome {
    match try_run(args, out, err) {
        Ok(outcome) => outcome,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            if matches!(e, DriverError::Cli(_) | DriverError::NoProgram) {
                let _ = write!(err, "\n{USAGE}");
            }
            Outcome::Fatal
        }
    }
}

fn try_run(
    args: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Outcome, DriverError> {
    let options = parse_args(args)?;
    if options.help {
        let _ = write!(err, "{USAGE}");
        return Ok(Outcome::Clean);
    }

    let config = options.check_config()?;
    let program = options.program.as_ref().ok_or(DriverError::NoProgram)?;
    let loader = JsonProgramLoader::new(program);
    let report = analyze(&loader, &options.load_request(), &config)?;

    for unit in report.empty_units() {
        let _ = writeln!(err, "{unit}: package contains no go source files");
    }
    info!(diagnostics = report.diagnostics().len(), "check finished");
    emit(&options, &report, out);
    Ok(Outcome::from_report(&report))
}

fn emit(options: &Options, report: &Report, out: &mut dyn Write) {
    match options.format {
        Format::Json => {
            let mut emitter = JsonEmitter::new(out);
            emitter.begin();
            emitter.emit_all(report.diagnostics());
            emitter.end();
            emitter.flush();
        }
        Format::Text => {
            let mut emitter = TextEmitter::new(out).verbose(options.verbose);
            if !options.abspath {
                if let Some(cwd) = working_dir() {
                    emitter = emitter.relative_to(cwd);
                }
            }
            emitter.emit_all(report.diagnostics());
            emitter.flush();
        }
    }
}

fn working_dir() -> Option<PathBuf> {
    match std::env::current_dir() {
        Ok(cwd) => Some(cwd),
        Err(e) => {
            warn!("cannot determine working directory ({e}), printing paths as recorded");
            None
        }
    }
}
