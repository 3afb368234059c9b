#![forbid(unsafe_code)]

//! Command-line argument parsing for `callscope`.
//!
//! Parses args manually, no arg-parser crate. Environment variables with the
//! `CALLSCOPE_` prefix provide defaults; explicit flags override them.

use std::fmt;
use std::path::PathBuf;

use callscope_inspector::StatusFilter;
use callscope_text::{ClassifierKind, DEFAULT_PREVIEW_WIDTH};

/// Crate version, printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const HELP_TEXT: &str = "\
callscope - search and inspect captured API calls

USAGE:
    callscope [OPTIONS] <FILE>

    FILE is a JSON array of calls (or a single call object); '-' reads stdin.
    Calls are listed newest first, i.e. the last call in the file is #1.

OPTIONS:
    -f, --file=FILE        Call file (alternative to the positional argument)
    -q, --query=TEXT       Search text (case-insensitive)
    -c, --call=N           Open call N of the listed calls (1-based)
    -n, --next=N           Move the match cursor forward N matches
    -p, --prev=N           Move the match cursor back N matches
        --filter=KIND      List filter: all, success, errors, pending
        --classifier=KIND  JSON colouring: pattern (default) or scan
        --width=N          Preview width of URLs in the call list (default: 100)
        --curl             Print the selected call as a curl command
        --raw              Print the selected call as a raw text dump
        --no-pretty        Keep bodies verbatim instead of re-indenting JSON
        --no-color         Disable colours and styling
    -h, --help             Show this help message
    -V, --version          Show version

ENVIRONMENT VARIABLES:
    CALLSCOPE_FILE          Default for --file
    CALLSCOPE_QUERY         Default for --query
    CALLSCOPE_CLASSIFIER    Default for --classifier
    CALLSCOPE_PRETTY_JSON   0/false/off behaves like --no-pretty
    CALLSCOPE_LOG_CAPACITY  Maximum number of calls kept (default: 500)
    CALLSCOPE_REDACT_HEADERS
                            Comma-separated header names to mask
                            (default: authorization,cookie,x-api-key; empty: none)
    CALLSCOPE_LOG           Log filter for diagnostics on stderr (default: warn)
    NO_COLOR                Any non-empty value behaves like --no-color";

/// Default call file.
pub const ENV_FILE: &str = "CALLSCOPE_FILE";
/// Default search text.
pub const ENV_QUERY: &str = "CALLSCOPE_QUERY";
/// Any non-empty value turns colour off.
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// What to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Call list, or the detail view when a call is selected.
    #[default]
    View,
    /// curl command of the selected call.
    Curl,
    /// Raw dump of the selected call.
    Raw,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Call file; `-` for stdin.
    pub file: Option<PathBuf>,
    /// Search text.
    pub query: String,
    /// Selected call, 1-based into the listed calls.
    pub call: Option<usize>,
    /// Forward cursor steps.
    pub next: usize,
    /// Backward cursor steps.
    pub prev: usize,
    /// Status filter for the list.
    pub filter: StatusFilter,
    /// Classifier override; `None` keeps the inspector config.
    pub classifier: Option<ClassifierKind>,
    /// `Some(false)` forces verbatim bodies; `None` keeps the inspector config.
    pub pretty: Option<bool>,
    /// URL preview width in the list.
    pub width: usize,
    /// Output mode.
    pub mode: OutputMode,
    /// Whether to emit colours.
    pub color: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            file: None,
            query: String::new(),
            call: None,
            next: 0,
            prev: 0,
            filter: StatusFilter::All,
            classifier: None,
            pretty: None,
            width: DEFAULT_PREVIEW_WIDTH,
            mode: OutputMode::View,
            color: true,
        }
    }
}

/// Result of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// Flag not recognised.
    Unknown(String),
    /// Flag given without its value.
    MissingValue(&'static str),
    /// Flag value could not be parsed.
    InvalidValue {
        flag: &'static str,
        value: String,
        reason: String,
    },
    /// More than one input file.
    ExtraArgument(String),
    /// No input file given.
    MissingFile,
    /// `--curl` and `--raw` together, or either without `--call`.
    Conflict(&'static str),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(arg) => write!(f, "unknown argument: {arg}"),
            Self::MissingValue(flag) => write!(f, "missing value for {flag}"),
            Self::InvalidValue {
                flag,
                value,
                reason,
            } => write!(f, "invalid {flag} value '{value}': {reason}"),
            Self::ExtraArgument(arg) => write!(f, "unexpected extra argument: {arg}"),
            Self::MissingFile => f.write_str("no call file given"),
            Self::Conflict(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ArgError {}

fn parse_count(flag: &'static str, value: &str) -> Result<usize, ArgError> {
    value.parse().map_err(|e: std::num::ParseIntError| ArgError::InvalidValue {
        flag,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn invalid(flag: &'static str, value: &str, err: impl fmt::Display) -> ArgError {
    ArgError::InvalidValue {
        flag,
        value: value.to_string(),
        reason: err.to_string(),
    }
}

impl Opts {
    /// Parse `args` (without the program name) with env defaults from
    /// `lookup`.
    pub fn parse_from<I, S, F>(args: I, lookup: F) -> Result<Command, ArgError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = lookup(ENV_FILE)
            && !val.is_empty()
        {
            opts.file = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup(ENV_QUERY) {
            opts.query = val;
        }
        if let Some(val) = lookup(ENV_NO_COLOR)
            && !val.is_empty()
        {
            opts.color = false;
        }

        // Parse command-line args (override env vars)
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut positional: Option<PathBuf> = None;
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            // `--flag=value` or `--flag value`
            let (name, inline) = match arg.split_once('=') {
                Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
                _ => (arg, None),
            };
            let mut value = |flag: &'static str| -> Result<String, ArgError> {
                if let Some(v) = &inline {
                    return Ok(v.clone());
                }
                i += 1;
                args.get(i).cloned().ok_or(ArgError::MissingValue(flag))
            };

            match name {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--file" | "-f" => opts.file = Some(PathBuf::from(value("--file")?)),
                "--query" | "-q" => opts.query = value("--query")?,
                "--call" | "-c" => {
                    let v = value("--call")?;
                    let n = parse_count("--call", &v)?;
                    if n == 0 {
                        return Err(invalid("--call", &v, "calls are numbered from 1"));
                    }
                    opts.call = Some(n);
                }
                "--next" | "-n" => {
                    let v = value("--next")?;
                    opts.next = parse_count("--next", &v)?;
                }
                "--prev" | "-p" => {
                    let v = value("--prev")?;
                    opts.prev = parse_count("--prev", &v)?;
                }
                "--width" => {
                    let v = value("--width")?;
                    opts.width = parse_count("--width", &v)?;
                }
                "--filter" => {
                    let v = value("--filter")?;
                    opts.filter = v.parse().map_err(|e| invalid("--filter", &v, e))?;
                }
                "--classifier" => {
                    let v = value("--classifier")?;
                    opts.classifier = Some(v.parse().map_err(|e| invalid("--classifier", &v, e))?);
                }
                "--curl" => opts.mode = set_mode(opts.mode, OutputMode::Curl)?,
                "--raw" => opts.mode = set_mode(opts.mode, OutputMode::Raw)?,
                "--no-pretty" => opts.pretty = Some(false),
                "--no-color" => opts.color = false,
                "-" => set_positional(&mut positional, arg)?,
                other if other.starts_with('-') => return Err(ArgError::Unknown(arg.to_string())),
                _ => set_positional(&mut positional, arg)?,
            }
            i += 1;
        }

        if let Some(path) = positional {
            opts.file = Some(path);
        }
        if opts.file.is_none() {
            return Err(ArgError::MissingFile);
        }
        if opts.mode != OutputMode::View && opts.call.is_none() {
            return Err(ArgError::Conflict("--curl and --raw need --call"));
        }
        Ok(Command::Run(opts))
    }
}

fn set_mode(current: OutputMode, wanted: OutputMode) -> Result<OutputMode, ArgError> {
    if current != OutputMode::View && current != wanted {
        return Err(ArgError::Conflict("--curl and --raw are mutually exclusive"));
    }
    Ok(wanted)
}

fn set_positional(slot: &mut Option<PathBuf>, arg: &str) -> Result<(), ArgError> {
    if slot.is_some() {
        return Err(ArgError::ExtraArgument(arg.to_string()));
    }
    *slot = Some(PathBuf::from(arg));
    Ok(())
}
