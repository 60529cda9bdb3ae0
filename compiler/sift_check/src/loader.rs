//! Program loading boundary.
//!
//! Loading is the job of an external front end; the checker only sees the
//! [`ProgramLoader`] trait. This module also holds what every loader shares:
//! unit selection by package pattern, build tags and test inclusion, and
//! verification of a loaded program before any unit is checked.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use sift_diagnostic::Report;
use sift_ir::{Program, ProgramUnit, TreeError};

use crate::checker::Checker;
use crate::config::CheckConfig;

/// Module resolution mode, passed through to the front end.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ModMode {
    /// Front end default.
    #[default]
    Default,
    Readonly,
    Vendor,
    Mod,
}

impl ModMode {
    pub fn parse(s: &str) -> Result<Self, LoadError> {
        match s {
            "" => Ok(ModMode::Default),
            "readonly" => Ok(ModMode::Readonly),
            "vendor" => Ok(ModMode::Vendor),
            "mod" => Ok(ModMode::Mod),
            other => Err(LoadError::ModMode(other.to_string())),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ModMode::Default => "",
            ModMode::Readonly => "readonly",
            ModMode::Vendor => "vendor",
            ModMode::Mod => "mod",
        }
    }
}

impl fmt::Display for ModMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to load.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct LoadRequest {
    /// Package patterns; empty means `.`.
    pub patterns: Vec<String>,
    /// Build tags to enable.
    pub tags: Vec<String>,
    pub module_mode: ModMode,
    /// Include test variants of packages.
    pub tests: bool,
}

/// Why a program could not be loaded. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid module mode {0:?}: expected one of \"\", readonly, vendor, mod")]
    ModMode(String),
    #[error("no packages to check")]
    Empty,
    #[error("pattern {0:?} matched no packages")]
    NoMatch(String),
    #[error("malformed syntax tree in {file}: {source}")]
    Malformed {
        file: String,
        #[source]
        source: TreeError,
    },
    #[error("errors in package {unit}:\n\t{}", .errors.join("\n\t"))]
    TypeErrors { unit: String, errors: Vec<String> },
}

/// Source of type-checked programs.
pub trait ProgramLoader {
    fn load(&self, request: &LoadRequest) -> Result<Program, LoadError>;
}

/// Keep the units `request` asks for.
///
/// Patterns: `.`, `./...` and `...` select every unit; `p/...` selects `p`
/// and packages below it; anything else is an exact package path. Every
/// pattern must match at least one package. Units needing build tags are
/// kept only if all their tags were requested; test variants only if tests
/// were requested.
pub fn select_units(program: Program, request: &LoadRequest) -> Result<Program, LoadError> {
    if program.units.is_empty() {
        return Err(LoadError::Empty);
    }
    let default_patterns = [".".to_string()];
    let patterns = if request.patterns.is_empty() {
        &default_patterns[..]
    } else {
        &request.patterns[..]
    };
    for pattern in patterns {
        if !program
            .units
            .iter()
            .any(|unit| pattern_matches(pattern, &unit.path))
        {
            return Err(LoadError::NoMatch(pattern.clone()));
        }
    }

    let Program { types, units } = program;
    let units: Vec<ProgramUnit> = units
        .into_iter()
        .filter(|unit| patterns.iter().any(|p| pattern_matches(p, &unit.path)))
        .filter(|unit| unit.tags.iter().all(|tag| request.tags.contains(tag)))
        .filter(|unit| request.tests || !unit.for_test)
        .collect();
    debug!(selected = units.len(), "selected units");
    Ok(Program::new(types, units))
}

/// Does `pattern` select the package at `path`?
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern {
        "." | "./..." | "..." => true,
        _ => match pattern.strip_suffix("/...") {
            Some(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => path == pattern,
        },
    }
}

/// Reject programs the checker must not run on: type errors in any unit, or
/// syntax trees that are not trees.
pub fn verify(program: &Program) -> Result<(), LoadError> {
    if program.units.is_empty() {
        return Err(LoadError::Empty);
    }
    for unit in &program.units {
        if !unit.errors.is_empty() {
            return Err(LoadError::TypeErrors {
                unit: unit.id.clone(),
                errors: unit.errors.clone(),
            });
        }
        for file in &unit.files {
            file.tree.validate().map_err(|source| LoadError::Malformed {
                file: file.source.path().to_string(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Load, verify and check a program.
#[tracing::instrument(level = "debug", skip_all, fields(patterns = ?request.patterns))]
pub fn analyze(
    loader: &dyn ProgramLoader,
    request: &LoadRequest,
    config: &CheckConfig,
) -> Result<Report, LoadError> {
    let program = loader.load(request)?;
    verify(&program)?;
    Ok(Checker::new(config).check_program(&program))
}
