//! Program dumps.
//!
//! A dump is the JSON form of a [`Program`]: the shared type pool plus every
//! unit the front end loaded, with source text and typed syntax trees. Front
//! ends write one per session; the loader reads it back and applies the
//! request's package selection.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use sift_check::{select_units, LoadError, LoadRequest, ProgramLoader};
use sift_ir::Program;

/// Loads programs from a JSON dump file.
#[derive(Clone, Debug)]
pub struct JsonProgramLoader {
    path: PathBuf,
}

impl JsonProgramLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonProgramLoader { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole dump, without unit selection.
    pub fn read(&self) -> Result<Program, LoadError> {
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::Decode {
            path: self.path.clone(),
            source: Box::new(e),
        })
    }
}

impl ProgramLoader for JsonProgramLoader {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    fn load(&self, request: &LoadRequest) -> Result<Program, LoadError> {
        let program = self.read()?;
        debug!(
            units = program.units.len(),
            types = program.types.len(),
            module_mode = %request.module_mode,
            "read program dump"
        );
        select_units(program, request)
    }
}
