use super::*;
use pretty_assertions::assert_eq;
use std::io::Write;

fn index(exclusions: &Exclusions) -> ExclusionIndex {
    ExclusionIndex::new(exclusions)
}

fn remove() -> Callee {
    Callee::new("Remove", Some("os"), "os.Remove")
}

fn regexes(entries: &[(&str, &str)]) -> Exclusions {
    let mut exclusions = Exclusions::default();
    for (package, re) in entries {
        exclusions
            .symbol_regexes
            .insert((*package).to_string(), Regex::new(re).unwrap());
    }
    exclusions
}

#[test]
fn test_nothing_configured() {
    let idx = index(&Exclusions::default());
    assert_eq!(idx.exclusion_reason(&remove()), None);
}

#[test]
fn test_unqualified_regex() {
    let idx = index(&regexes(&[("", "^Rem")]));
    assert_eq!(idx.exclusion_reason(&remove()), Some(ExclusionReason::Unqualified));
}

#[test]
fn test_package_regex_only_applies_to_its_package() {
    let idx = index(&regexes(&[("io", "^Remove$")]));
    assert!(idx.exclusion_reason(&remove()).is_none());

    let idx = index(&regexes(&[("os", "^Remove$")]));
    assert_eq!(idx.exclusion_reason(&remove()), Some(ExclusionReason::Package));
}

#[test]
fn test_non_matching_package_regex_falls_through() {
    let mut exclusions = regexes(&[("os", "^Open$")]);
    exclusions.symbols.push("os.Remove".to_string());
    assert_eq!(
        index(&exclusions).exclusion_reason(&remove()),
        Some(ExclusionReason::Symbol)
    );
}

#[test]
fn test_whole_package() {
    let exclusions = Exclusions {
        packages: vec!["os".to_string()],
        ..Exclusions::default()
    };
    assert_eq!(
        index(&exclusions).exclusion_reason(&remove()),
        Some(ExclusionReason::Package)
    );
}

#[test]
fn test_vendored_packages_match_either_spelling() {
    let vendored = Callee::new("Info", Some("github.com/app/vendor/github.com/log"), "x");
    for key in ["github.com/log", "github.com/app/vendor/github.com/log"] {
        let idx = index(&regexes(&[(key, "Info")]));
        assert!(idx.exclusion_reason(&vendored).is_some(), "{key}");
    }
}

#[test]
fn test_symbol_narrowed_by_first_argument() {
    let exclusions = Exclusions {
        symbols: vec!["a.Log(*a.Logger)".to_string()],
        use_defaults: false,
        ..Exclusions::default()
    };
    let idx = index(&exclusions);
    let log = Callee::new("Log", Some("a"), "a.Log");

    assert!(idx.exclusion_reason(&log).is_none());
    assert!(idx.exclusion_reason(&log.clone().with_first_arg("*a.Logger")).is_some());
    assert!(idx.exclusion_reason(&log.with_first_arg("*a.Other")).is_none());
}

#[test]
fn test_any_candidate_matches() {
    let exclusions = Exclusions {
        symbols: vec!["(a.Wrapper).Close".to_string()],
        ..Exclusions::default()
    };
    let close = Callee::new("Close", Some("io"), "(io.Closer).Close").with_candidates([
        "(a.Wrapper).Close".to_string(),
        "(io.Closer).Close".to_string(),
    ]);
    assert_eq!(
        index(&exclusions).exclusion_reason(&close),
        Some(ExclusionReason::Symbol)
    );
}

#[test]
fn test_defaults_can_be_disabled() {
    let println = Callee::new("Println", Some("fmt"), "fmt.Println");
    let stderr = Callee::new("Fprintln", Some("fmt"), "fmt.Fprintln").with_first_arg("os.Stderr");
    let stdout = Callee::new("Fprintln", Some("fmt"), "fmt.Fprintln").with_first_arg("os.Stdout");

    let idx = index(&Exclusions::default());
    assert_eq!(idx.exclusion_reason(&println), Some(ExclusionReason::Default));
    assert_eq!(idx.exclusion_reason(&stderr), Some(ExclusionReason::Default));
    assert_eq!(idx.exclusion_reason(&stdout), None);

    let idx = index(&Exclusions {
        use_defaults: false,
        ..Exclusions::default()
    });
    assert!(idx.exclusion_reason(&println).is_none());
    assert!(idx.exclusion_reason(&stderr).is_none());
}

#[test]
fn test_non_vendored_path() {
    assert_eq!(non_vendored_path("github.com/x/y"), "github.com/x/y");
    assert_eq!(non_vendored_path("a/vendor/b/vendor/c/d"), "c/d");
    assert_eq!(non_vendored_path("vendor/x"), "vendor/x");
}

#[test]
fn test_read_excludes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "// never fails\n  hello()  \n\n(*a.T).Close\r\n\t// indented comment\nworld()"
    )
    .unwrap();

    assert_eq!(
        read_excludes(file.path()).unwrap(),
        vec!["hello()", "(*a.T).Close", "world()"]
    );
}

#[test]
fn test_read_empty_excludes() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert_eq!(read_excludes(file.path()).unwrap(), Vec::<String>::new());
}

#[test]
fn test_read_missing_excludes() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let err = read_excludes(&missing).unwrap_err();
    assert!(matches!(err, ExcludeFileError::Io { ref path, .. } if *path == missing));
    assert!(err.to_string().starts_with("could not read exclude file"));
}
