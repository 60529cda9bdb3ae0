//! Command-line flags.
//!
//! Flags use the single-dash style of Go tools (`-blank`, `-tags a,b`,
//! `-format=json`); a double dash is accepted too. Boolean flags take an
//! optional `=true`/`=false`. Parsing stops at `--` or at the first argument
//! that is not a flag; everything after it is a package pattern.

use std::path::PathBuf;
use std::slice;

use regex::Regex;
use rustc_hash::FxHashMap;

use sift_check::{
    read_excludes, CheckConfig, CheckFlags, ExcludeFileError, Exclusions, LoadError, LoadRequest,
    ModMode,
};

pub const USAGE: &str = "\
Usage: errsift -program <dump.json> [flags] [packages]

Flags:
  -program <file>     typed program dump to check
  -blank              report errors assigned to the blank identifier
  -asserts            report type assertions that do not check their result
  -ignore <list>      comma-separated pkg:regex pairs; names matching regex in
                      pkg are not checked (no pkg: applies to every package)
  -ignorepkg <list>   comma-separated package paths not to check
  -ignoretests        skip _test.go files and test packages
  -ignoregenerated    skip generated files
  -exclude <file>     file of symbols not to check, one per line
  -excludeonly        use only the -exclude file, not the built-in list
  -tags <list>        build tags, separated by commas or spaces
  -mod <mode>         module mode: readonly, vendor or mod
  -abspath            print absolute paths
  -verbose            print the called function after each line
  -format <fmt>       output format: text or json
";

/// Output format of the report.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self, CliError> {
        match s {
            "" | "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(CliError::Format(other.to_string())),
        }
    }
}

/// Invalid command line. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),
    #[error("invalid boolean value {value:?} for -{flag}")]
    InvalidBool { flag: String, value: String },
    #[error("invalid regular expression in -ignore for {package:?}: {source}")]
    Regex {
        package: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid output format {0:?}: expected text or json")]
    Format(String),
    #[error(transparent)]
    ModMode(#[from] LoadError),
}

/// Everything the command line sets.
#[derive(Debug, Default)]
pub struct Options {
    pub flags: CheckFlags,
    /// `-ignore` rules keyed by package path; `""` applies to every call.
    pub ignore: FxHashMap<String, Regex>,
    pub ignore_packages: Vec<String>,
    pub ignore_tests: bool,
    pub ignore_generated: bool,
    pub tags: Vec<String>,
    pub exclude_file: Option<PathBuf>,
    pub exclude_only: bool,
    pub module_mode: ModMode,
    pub abspath: bool,
    pub verbose: bool,
    pub format: Format,
    pub program: Option<PathBuf>,
    pub patterns: Vec<String>,
    pub help: bool,
}

impl Options {
    /// Checker configuration. Reads the `-exclude` file if one was given.
    pub fn check_config(&self) -> Result<CheckConfig, ExcludeFileError> {
        let symbols = match &self.exclude_file {
            Some(path) => read_excludes(path)?,
            None => Vec::new(),
        };
        let exclusions = Exclusions {
            symbol_regexes: self.ignore.clone(),
            packages: self.ignore_packages.clone(),
            symbols,
            use_defaults: !self.exclude_only,
            test_files: self.ignore_tests,
            generated_files: self.ignore_generated,
        };
        Ok(CheckConfig::new(self.flags, exclusions))
    }

    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            patterns: self.patterns.clone(),
            tags: self.tags.clone(),
            module_mode: self.module_mode,
            tests: !self.ignore_tests,
        }
    }
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();
    let mut rest = args.iter();

    while let Some(arg) = rest.next() {
        if arg == "--" {
            options.patterns.extend(rest.cloned());
            break;
        }
        let Some(flag) = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .filter(|flag| !flag.is_empty())
        else {
            options.patterns.push(arg.clone());
            options.patterns.extend(rest.cloned());
            break;
        };
        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        match name {
            "blank" => options.flags.set(CheckFlags::BLANK, bool_value(name, inline)?),
            "asserts" => options
                .flags
                .set(CheckFlags::ASSERTS, bool_value(name, inline)?),
            "ignoretests" => options.ignore_tests = bool_value(name, inline)?,
            "ignoregenerated" => options.ignore_generated = bool_value(name, inline)?,
            "excludeonly" => options.exclude_only = bool_value(name, inline)?,
            "abspath" => options.abspath = bool_value(name, inline)?,
            "verbose" | "v" => options.verbose = bool_value(name, inline)?,
            "h" | "help" => options.help = true,
            "ignore" => parse_ignore(string_value(name, inline, &mut rest)?, &mut options.ignore)?,
            "ignorepkg" => {
                options.ignore_packages = split_list(string_value(name, inline, &mut rest)?);
            }
            "tags" => options.tags = split_tags(string_value(name, inline, &mut rest)?),
            "exclude" => {
                options.exclude_file = Some(PathBuf::from(string_value(name, inline, &mut rest)?));
            }
            "mod" => options.module_mode = ModMode::parse(string_value(name, inline, &mut rest)?)?,
            "format" => options.format = Format::parse(string_value(name, inline, &mut rest)?)?,
            "program" => {
                options.program = Some(PathBuf::from(string_value(name, inline, &mut rest)?));
            }
            _ => return Err(CliError::UnknownFlag(name.to_string())),
        }
    }
    Ok(options)
}

fn bool_value(name: &str, inline: Option<&str>) -> Result<bool, CliError> {
    match inline {
        None | Some("1" | "t" | "T" | "true" | "TRUE" | "True") => Ok(true),
        Some("0" | "f" | "F" | "false" | "FALSE" | "False") => Ok(false),
        Some(value) => Err(CliError::InvalidBool {
            flag: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// The flag's value: after `=`, or the next argument.
fn string_value<'a>(
    name: &str,
    inline: Option<&'a str>,
    rest: &mut slice::Iter<'a, String>,
) -> Result<&'a str, CliError> {
    match inline {
        Some(value) => Ok(value),
        None => rest
            .next()
            .map(String::as_str)
            .ok_or_else(|| CliError::MissingValue(name.to_string())),
    }
}

/// `pkg:regex,regex2`: entries without a package apply to every call.
fn parse_ignore(value: &str, into: &mut FxHashMap<String, Regex>) -> Result<(), CliError> {
    for entry in value.split(',').filter(|entry| !entry.is_empty()) {
        let (package, pattern) = entry.split_once(':').unwrap_or(("", entry));
        let regex = Regex::new(pattern).map_err(|source| CliError::Regex {
            package: package.to_string(),
            source,
        })?;
        into.insert(package.to_string(), regex);
    }
    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build tags may be separated by commas or whitespace.
fn split_tags(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
