//! Per-unit fan-out.
//!
//! Every program unit is visited independently on a scoped rayon pool; each
//! worker hands its complete diagnostic list to the shared [`Aggregator`].
//! The type pool, exclusion index and configuration are shared read-only.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use sift_diagnostic::{Aggregator, Diagnostic, Report};
use sift_ir::{Program, ProgramUnit, TypePool};

use crate::config::CheckConfig;
use crate::exclusions::ExclusionIndex;
use crate::generated::{is_generated, is_test_file};
use crate::visitor::check_file;

/// The pseudo-package with compiler-intrinsic declarations; never checked.
const UNSAFE_PACKAGE: &str = "unsafe";

/// Stack size for checker threads. Deep trees grow the stack on demand, a
/// larger start avoids most growth.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Runs the statement visitor over units under one configuration.
pub struct Checker<'cfg> {
    config: &'cfg CheckConfig,
    index: ExclusionIndex,
}

impl<'cfg> Checker<'cfg> {
    pub fn new(config: &'cfg CheckConfig) -> Self {
        Checker {
            config,
            index: ExclusionIndex::new(&config.exclusions),
        }
    }

    /// Diagnostics of one unit, in visit order.
    #[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.id))]
    pub fn check_unit(&self, types: &TypePool, unit: &ProgramUnit) -> Vec<Diagnostic> {
        if unit.path == UNSAFE_PACKAGE {
            return Vec::new();
        }
        let exclusions = &self.config.exclusions;
        let mut diagnostics = Vec::new();
        for file in &unit.files {
            if exclusions.test_files && is_test_file(&file.source) {
                debug!(file = file.source.path(), "skipping test file");
                continue;
            }
            if exclusions.generated_files && is_generated(&file.source) {
                debug!(file = file.source.path(), "skipping generated file");
                continue;
            }
            diagnostics.extend(check_file(types, &self.index, self.config, file));
        }
        diagnostics
    }

    /// Check every unit and aggregate the results.
    ///
    /// Units without source files are listed in the report and otherwise
    /// contribute nothing.
    #[tracing::instrument(level = "debug", skip_all, fields(units = program.units.len()))]
    pub fn check_program(&self, program: &Program) -> Report {
        let aggregator = Aggregator::new();
        let mut units = Vec::with_capacity(program.units.len());
        for unit in &program.units {
            if unit.files.is_empty() {
                info!(unit = %unit.id, "package contains no source files");
                aggregator.note_empty_unit(unit.id.clone());
            } else {
                units.push(unit);
            }
        }

        if units.len() > 1 {
            self.check_parallel(&program.types, &units, &aggregator);
        } else {
            self.check_sequential(&program.types, &units, &aggregator);
        }
        aggregator.finish()
    }

    fn check_sequential(&self, types: &TypePool, units: &[&ProgramUnit], aggregator: &Aggregator) {
        for unit in units {
            aggregator.merge(self.check_unit(types, unit));
        }
    }

    /// Check units on a scoped pool that is torn down before returning.
    fn check_parallel(&self, types: &TypePool, units: &[&ProgramUnit], aggregator: &Aggregator) {
        let built = rayon::ThreadPoolBuilder::new()
            .stack_size(WORKER_STACK_SIZE)
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    units
                        .par_iter()
                        .for_each(|unit| aggregator.merge(self.check_unit(types, unit)));
                });
            });
        if let Err(e) = built {
            warn!("failed to create thread pool ({e}), checking sequentially");
            self.check_sequential(types, units, aggregator);
        }
    }
}

#[cfg(test)]
mod tests;
