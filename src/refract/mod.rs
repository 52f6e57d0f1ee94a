//! Loading and querying API Blueprint parse results

mod element;
mod query;

pub use element::{Content, Element, KeyValue, Meta};
pub use query::{query, query_first, Pattern};

use std::fmt;
use std::path::Path;
use tracing::debug;

/// A problem encountered while reading or deserializing a parse-result
/// file, before any decoration has begun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.filename
                .to_string_lossy(),
            self.problem
        )
    }
}

/// Read a parse-result file and return an owned String, passing ownership
/// back to the caller so the Element tree built from it can borrow freely.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Deserialize parse-result JSON into the Element tree. The structure is
/// whatever the producing parser emitted; only JSON-level problems are
/// reported here.
pub fn parse<'i>(filename: &'i Path, content: &str) -> Result<Element, LoadingError<'i>> {
    match serde_json::from_str(content) {
        Ok(root) => Ok(root),
        Err(error) => Err(LoadingError {
            problem: "Malformed parse result".to_string(),
            details: error.to_string(),
            filename,
        }),
    }
}
