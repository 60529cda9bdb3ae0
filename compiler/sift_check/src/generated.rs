//! Generated and test file detection.

use std::sync::LazyLock;

use regex::Regex;

use sift_ir::SourceFile;

/// Marker line of machine-generated Go files.
static GENERATED_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^// Code generated .* DO NOT EDIT\.$").ok());

/// Does the file carry the generated-code marker before its package clause?
pub fn is_generated(source: &SourceFile) -> bool {
    let Some(marker) = GENERATED_MARKER.as_ref() else {
        return false;
    };
    source
        .text()
        .lines()
        .map(str::trim_end)
        .take_while(|line| !line.starts_with("package "))
        .any(|line| marker.is_match(line))
}

/// Is this a `_test.go` file?
pub fn is_test_file(source: &SourceFile) -> bool {
    source.path().ends_with("_test.go")
}
