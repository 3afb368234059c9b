#![forbid(unsafe_code)]

//! The `callscope` terminal front end.
//!
//! [`run`] takes parsed [`cli::Opts`] and an [`InspectorConfig`] and returns
//! the text to print, so everything short of process I/O is testable.

pub mod cli;
pub mod logging;
pub mod render;

use std::fmt;
use std::io::{self, Read};

use callscope_inspector::{
    ApiCall, CallLog, DetailSession, InspectorConfig, LoadError, curl_command, load_calls,
    parse_calls, raw_dump,
};

use crate::cli::{Opts, OutputMode};

/// Failure while producing output.
#[derive(Debug)]
pub enum RunError {
    /// Reading standard input failed.
    Stdin(io::Error),
    /// The call file could not be loaded.
    Load(LoadError),
    /// `--call` points past the listed calls.
    NoSuchCall { number: usize, listed: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin(err) => write!(f, "cannot read standard input: {err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::NoSuchCall { number, listed } => {
                write!(f, "no call #{number} (listed calls: {listed})")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stdin(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::NoSuchCall { .. } => None,
        }
    }
}

impl From<LoadError> for RunError {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}

/// Apply command-line overrides to the environment-derived config.
#[must_use]
pub fn effective_config(opts: &Opts, mut config: InspectorConfig) -> InspectorConfig {
    if let Some(kind) = opts.classifier {
        config.classifier = kind;
    }
    if let Some(pretty) = opts.pretty {
        config.pretty_json = pretty;
    }
    config
}

fn read_input(opts: &Opts) -> Result<Vec<ApiCall>, RunError> {
    match opts.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => Ok(load_calls(path)?),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(RunError::Stdin)?;
            Ok(parse_calls(&text)?)
        }
    }
}

/// Load calls per `opts` and render the requested output.
pub fn run(opts: &Opts, config: InspectorConfig) -> Result<String, RunError> {
    let calls = read_input(opts)?;
    render_calls(calls, opts, config)
}

/// Render already loaded calls (in capture order) per `opts`.
pub fn render_calls(
    calls: Vec<ApiCall>,
    opts: &Opts,
    config: InspectorConfig,
) -> Result<String, RunError> {
    let config = effective_config(opts, config);

    let mut log = CallLog::with_capacity(config.log_capacity);
    log.extend(calls);
    let listed = log.filtered(&opts.query, opts.filter);

    tracing::debug!(
        total = log.len(),
        listed = listed.len(),
        filter = %opts.filter,
        "call list built"
    );

    let Some(number) = opts.call else {
        return Ok(render::render_list(
            &listed,
            log.stats(),
            &opts.query,
            opts.filter,
            opts.width,
            opts.color,
        ));
    };

    let call = number
        .checked_sub(1)
        .and_then(|i| listed.get(i))
        .map(|c| (*c).clone())
        .ok_or(RunError::NoSuchCall {
            number,
            listed: listed.len(),
        })?;

    match opts.mode {
        OutputMode::Curl => Ok(curl_command(&call, &config.redact_headers)),
        OutputMode::Raw => Ok(raw_dump(&call, &config.redact_headers)),
        OutputMode::View => {
            let mut session = DetailSession::open(call, &config);
            session.set_query(&opts.query);
            session.advance(opts.next);
            session.retreat(opts.prev);
            Ok(render::render_detail(&session, opts.color))
        }
    }
}
