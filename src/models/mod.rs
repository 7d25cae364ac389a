pub mod photo;
pub mod social;

use log::{error, warn};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reading a data file from disk.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("data file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: expected {expected} at the top level", .path.display())]
    Shape { path: PathBuf, expected: &'static str },
}

/// Read a file and parse it as untyped JSON. Callers turn the value into
/// domain records entry by entry so one bad entry doesn't sink the file.
pub(crate) fn read_json(path: &Path) -> Result<Value, DataError> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            DataError::Missing(path.to_path_buf())
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|e| DataError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pages never fail on data: a missing file is an empty site, anything
/// worse is logged and also rendered as empty.
pub fn or_empty<T: Default>(result: Result<T, DataError>) -> T {
    match result {
        Ok(v) => v,
        Err(e @ DataError::Missing(_)) => {
            warn!("{}", e);
            T::default()
        }
        Err(e) => {
            error!("{}", e);
            T::default()
        }
    }
}

/// Trim a free-form string, mapping blanks to `None`.
pub(crate) fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
