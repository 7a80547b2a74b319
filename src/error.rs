//! Error taxonomy for the catalog → collection pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an assembly call. Nothing is produced when one is raised.
#[derive(Error, Debug)]
pub enum Error {
    /// The documentation file or the route catalog does not exist.
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// A required configuration string is empty.
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    #[error("malformed XML documentation in {}: {source}", path.display())]
    MalformedDocumentation {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    MalformedCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read a whole file, mapping a missing file to [`Error::NotFound`].
pub(crate) fn read_source(what: &'static str, path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                what,
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
