//! Fan-in of per-unit results.
//!
//! Workers each produce a complete diagnostic list for one unit and hand it
//! over with [`Aggregator::merge`]; nothing is appended diagnostic by
//! diagnostic from several threads. [`Aggregator::finish`] sorts and
//! deduplicates once every worker is done.

use parking_lot::Mutex;
use tracing::debug;

use crate::Diagnostic;

#[derive(Default)]
struct Collected {
    diagnostics: Vec<Diagnostic>,
    empty_units: Vec<String>,
}

/// Thread-safe collector of diagnostics.
#[derive(Default)]
pub struct Aggregator {
    collected: Mutex<Collected>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of one unit's diagnostics.
    pub fn merge(&self, diagnostics: Vec<Diagnostic>) {
        if diagnostics.is_empty() {
            return;
        }
        self.collected.lock().diagnostics.extend(diagnostics);
    }

    /// Record a unit that had no source files to analyze.
    pub fn note_empty_unit(&self, unit: impl Into<String>) {
        self.collected.lock().empty_units.push(unit.into());
    }

    /// Sort, deduplicate and hand out the final report.
    pub fn finish(self) -> Report {
        let Collected {
            mut diagnostics,
            mut empty_units,
        } = self.collected.into_inner();
        let merged = diagnostics.len();
        diagnostics.sort();
        diagnostics.dedup_by(|later, earlier| later.same_site(earlier));
        empty_units.sort();
        empty_units.dedup();
        debug!(
            merged,
            reported = diagnostics.len(),
            "aggregated diagnostics"
        );
        Report {
            diagnostics,
            empty_units,
        }
    }
}

/// Sorted, deduplicated result of one run.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
    empty_units: Vec<String>,
}

impl Report {
    /// Diagnostics ordered by file, line, column, line text and kind.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Ids of units that contributed no source files.
    pub fn empty_units(&self) -> &[String] {
        &self.empty_units
    }
}
