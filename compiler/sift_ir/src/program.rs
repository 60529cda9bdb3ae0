//! Program units: the input of one check run.

use crate::{SourceFile, SyntaxTree, TypePool};

/// A syntax tree paired with the source it was parsed from.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceUnit {
    pub source: SourceFile,
    pub tree: SyntaxTree,
}

impl SourceUnit {
    pub fn new(source: SourceFile, tree: SyntaxTree) -> Self {
        SourceUnit { source, tree }
    }
}

/// One type-checked package.
///
/// The same package can appear several times when it takes part in more than
/// one build configuration (`a` and its test variant `a [a.test]`); `id`
/// tells the variants apart.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramUnit {
    pub id: String,
    /// Package path, e.g. `github.com/x/y`.
    pub path: String,
    /// Package name from the package clause.
    pub name: String,
    pub files: Vec<SourceUnit>,
    /// Build tags this configuration requires.
    #[cfg_attr(feature = "dump", serde(default))]
    pub tags: Vec<String>,
    /// Test variant of the package.
    #[cfg_attr(feature = "dump", serde(default))]
    pub for_test: bool,
    /// Type errors the front end reported.
    #[cfg_attr(feature = "dump", serde(default))]
    pub errors: Vec<String>,
}

impl ProgramUnit {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        let path = path.into();
        ProgramUnit {
            id: path.clone(),
            path,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: SourceUnit) -> Self {
        self.files.push(file);
        self
    }
}

/// Every unit of one load session plus the type pool they share.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub types: TypePool,
    pub units: Vec<ProgramUnit>,
}

impl Program {
    pub fn new(types: TypePool, units: Vec<ProgramUnit>) -> Self {
        Program { types, units }
    }
}
