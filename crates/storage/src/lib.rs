use std::{io, path::PathBuf};

use thiserror::Error;

mod registry;
mod sink;

pub use registry::{seed_records, Registry};
pub use sink::{RegistrationSink, TabularSink, DEFAULT_INTERNS_FILE, HEADER, TABLE_NAME};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("interns table not found at {}", path.display())]
    StorageNotFound { path: PathBuf },
    #[error("unexpected header in {}: {found:?}", path.display())]
    InvalidHeader { path: PathBuf, found: Vec<String> },
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed interns table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StorageNotFound { .. })
    }
}

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
