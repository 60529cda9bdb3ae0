//! Exclusion rules.
//!
//! A call can be excluded from reporting four ways, checked in order:
//!
//! 1. an unqualified regex matching the bare callee name;
//! 2. a package rule: a regex over the names of one package, or the whole
//!    package;
//! 3. an exact qualified symbol from the user's list, optionally narrowed by
//!    the type of the first argument (`fmt.Fprintf(*bytes.Buffer)`);
//! 4. the built-in table of standard library calls documented never to fail.
//!
//! [`Exclusions`] is the user-facing configuration; [`ExclusionIndex`] is its
//! compiled, immutable form that workers query concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::callee::Callee;

/// Standard library calls whose failure result is documented to always be
/// nil.
pub const DEFAULT_EXCLUDED_SYMBOLS: &[&str] = &[
    // bytes
    "(*bytes.Buffer).Write",
    "(*bytes.Buffer).WriteByte",
    "(*bytes.Buffer).WriteRune",
    "(*bytes.Buffer).WriteString",
    // fmt
    "fmt.Print",
    "fmt.Printf",
    "fmt.Println",
    "fmt.Fprint(*bytes.Buffer)",
    "fmt.Fprintf(*bytes.Buffer)",
    "fmt.Fprintln(*bytes.Buffer)",
    "fmt.Fprint(*strings.Builder)",
    "fmt.Fprintf(*strings.Builder)",
    "fmt.Fprintln(*strings.Builder)",
    "fmt.Fprint(os.Stderr)",
    "fmt.Fprintf(os.Stderr)",
    "fmt.Fprintln(os.Stderr)",
    // io
    "(*io.PipeReader).CloseWithError",
    "(*io.PipeWriter).CloseWithError",
    // math/rand
    "math/rand.Read",
    "(*math/rand.Rand).Read",
    // strings
    "(*strings.Builder).Write",
    "(*strings.Builder).WriteByte",
    "(*strings.Builder).WriteRune",
    "(*strings.Builder).WriteString",
    // hash
    "(hash.Hash).Write",
    "(*hash/maphash.Hash).Write",
    "(*hash/maphash.Hash).WriteByte",
    "(*hash/maphash.Hash).WriteString",
];

/// User exclusion configuration.
#[derive(Clone, Debug)]
pub struct Exclusions {
    /// Name regexes keyed by package path. The empty key holds the
    /// unqualified regex applied to every callee.
    pub symbol_regexes: FxHashMap<String, Regex>,
    /// Packages whose calls are never reported.
    pub packages: Vec<String>,
    /// Qualified symbols, as read from an exclude file.
    pub symbols: Vec<String>,
    /// Apply [`DEFAULT_EXCLUDED_SYMBOLS`].
    pub use_defaults: bool,
    /// Skip `_test.go` files.
    pub test_files: bool,
    /// Skip files marked as generated.
    pub generated_files: bool,
}

impl Default for Exclusions {
    fn default() -> Self {
        Exclusions {
            symbol_regexes: FxHashMap::default(),
            packages: Vec::new(),
            symbols: Vec::new(),
            use_defaults: true,
            test_files: false,
            generated_files: false,
        }
    }
}

/// Which rule excluded a call.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ExclusionReason {
    Unqualified,
    Package,
    Symbol,
    Default,
}

#[derive(Clone, Debug)]
enum PackageRule {
    All,
    Matching(Regex),
}

/// Compiled exclusion rules.
#[derive(Clone, Debug)]
pub struct ExclusionIndex {
    unqualified: Option<Regex>,
    packages: FxHashMap<String, PackageRule>,
    symbols: FxHashSet<String>,
    defaults: FxHashSet<&'static str>,
}

impl ExclusionIndex {
    pub fn new(exclusions: &Exclusions) -> Self {
        let mut unqualified = None;
        let mut packages = FxHashMap::default();
        for (package, regex) in &exclusions.symbol_regexes {
            if package.is_empty() {
                unqualified = Some(regex.clone());
            } else {
                packages.insert(
                    non_vendored_path(package).to_string(),
                    PackageRule::Matching(regex.clone()),
                );
            }
        }
        for package in &exclusions.packages {
            packages.insert(non_vendored_path(package).to_string(), PackageRule::All);
        }

        let defaults = if exclusions.use_defaults {
            DEFAULT_EXCLUDED_SYMBOLS.iter().copied().collect()
        } else {
            FxHashSet::default()
        };

        ExclusionIndex {
            unqualified,
            packages,
            symbols: exclusions.symbols.iter().cloned().collect(),
            defaults,
        }
    }

    /// The first rule excluding `callee`, if any.
    pub fn exclusion_reason(&self, callee: &Callee) -> Option<ExclusionReason> {
        if self
            .unqualified
            .as_ref()
            .is_some_and(|re| re.is_match(callee.name()))
        {
            return Some(ExclusionReason::Unqualified);
        }

        let package_rule = callee
            .package()
            .and_then(|package| self.packages.get(non_vendored_path(package)));
        match package_rule {
            Some(PackageRule::All) => return Some(ExclusionReason::Package),
            Some(PackageRule::Matching(re)) if re.is_match(callee.name()) => {
                return Some(ExclusionReason::Package);
            }
            _ => {}
        }

        if matches_symbol(callee, |name| self.symbols.contains(name)) {
            return Some(ExclusionReason::Symbol);
        }
        if matches_symbol(callee, |name| self.defaults.contains(name)) {
            return Some(ExclusionReason::Default);
        }
        None
    }
}

/// Does any candidate name of `callee`, plain or narrowed by the first
/// argument, satisfy `contains`?
fn matches_symbol(callee: &Callee, contains: impl Fn(&str) -> bool) -> bool {
    callee.candidates().iter().any(|name| {
        contains(name)
            || callee
                .first_arg()
                .is_some_and(|arg| contains(&format!("{name}({arg})")))
    })
}

/// Strip a vendoring prefix: `x/vendor/github.com/y` is `github.com/y`.
pub fn non_vendored_path(path: &str) -> &str {
    const VENDOR: &str = "/vendor/";
    match path.rfind(VENDOR) {
        Some(idx) => &path[idx + VENDOR.len()..],
        None => path,
    }
}

/// Failure to read an exclude file.
#[derive(Debug, thiserror::Error)]
pub enum ExcludeFileError {
    #[error("could not read exclude file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read an exclude file: one qualified symbol per line. Lines are trimmed;
/// blank lines and `//` comments are skipped.
pub fn read_excludes(path: &Path) -> Result<Vec<String>, ExcludeFileError> {
    let text = fs::read_to_string(path).map_err(|source| ExcludeFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests;
