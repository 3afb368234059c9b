#![forbid(unsafe_code)]

//! Reading captured calls from JSON.
//!
//! A call file holds either an array of call objects or a single object.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::call::ApiCall;

/// Failure to read or decode a call file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The text is not a call or list of calls.
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid call data in {}: {source}", path.display()),
            Self::Parse { path: None, source } => write!(f, "invalid call data: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Decode calls from JSON text.
pub fn parse_calls(text: &str) -> Result<Vec<ApiCall>, LoadError> {
    let parse_err = |source: serde_json::Error| LoadError::Parse { path: None, source };
    let value: Value = serde_json::from_str(text).map_err(parse_err)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(parse_err))
            .collect(),
        other => Ok(vec![serde_json::from_value(other).map_err(parse_err)?]),
    }
}

/// Read and decode calls from `path`.
pub fn load_calls(path: impl AsRef<Path>) -> Result<Vec<ApiCall>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let calls = parse_calls(&text).map_err(|err| match err {
        LoadError::Parse { source, .. } => LoadError::Parse {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), count = calls.len(), "loaded calls");

    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn parses_array() {
        let calls = parse_calls(
            r#"[{"method":"GET","url":"/a","status":200},
                {"method":"DELETE","url":"/b","status":404,"error":"gone"}]"#,
        )
        .unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].error.as_deref(), Some("gone"));
    }

    #[test]
    fn parses_single_object() {
        let calls = parse_calls(r#"{"method":"GET","url":"/only"}"#).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "/only");
    }

    #[test]
    fn rejects_bad_json() {
        let err = parse_calls("[{").unwrap_err();
        assert!(matches!(err, LoadError::Parse { path: None, .. }));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid call data"));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(parse_calls(r#"[{"status":"ok"}]"#).is_err());
        assert!(parse_calls("42").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_calls("/definitely/not/here/calls.json").unwrap_err();
        match &err {
            LoadError::Io { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here/calls.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("cannot read"));
    }
}
