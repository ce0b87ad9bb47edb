use std::{
    fs::{self, File, OpenOptions},
    io::{self, ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use shared::domain::{InternRecord, InternStatus};
use tracing::{debug, info, warn};

use crate::{Result, StorageError};

pub const TABLE_NAME: &str = "Interns";
pub const DEFAULT_INTERNS_FILE: &str = "interns.csv";
pub const HEADER: [&str; 4] = ["Name", "Email", "Department", "Status"];

/// Durable destination for registration events.
pub trait RegistrationSink: Send + Sync {
    fn append(&self, record: &InternRecord) -> Result<()>;
}

/// Append-only CSV table mirroring every registration.
#[derive(Debug)]
pub struct TabularSink {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl TabularSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the table with only its header row when the file is absent.
    /// An existing file is left untouched. Returns whether a file was created.
    pub fn ensure_initialized(&self) -> Result<bool> {
        if self.path.exists() {
            debug!(path = %self.path.display(), "interns table already present");
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let created = self.create_table(|file| self.write_row(file, &HEADER))?;
        if created {
            info!(path = %self.path.display(), table = TABLE_NAME, "created interns table");
        }
        Ok(created)
    }

    /// Exclusively creates the file and fills it with `write_header`. A file
    /// whose header could not be written is removed again, so it is never
    /// mistaken for an initialized table.
    pub(crate) fn create_table(
        &self,
        write_header: impl FnOnce(&File) -> Result<()>,
    ) -> Result<bool> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(error) => return Err(self.io_error(error)),
        };

        if let Err(error) = write_header(&file) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&self.path) {
                warn!(
                    path = %self.path.display(),
                    %cleanup,
                    "failed to remove partial interns table"
                );
            }
            return Err(error);
        }
        Ok(true)
    }

    /// Appends one row to an existing table and syncs it to disk. The table
    /// must already exist; a missing file is [`StorageError::StorageNotFound`].
    pub fn append_row(
        &self,
        name: &str,
        email: &str,
        department: &str,
        status: InternStatus,
    ) -> Result<()> {
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let file = match OpenOptions::new().read(true).append(true).open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(StorageError::StorageNotFound {
                    path: self.path.clone(),
                });
            }
            Err(error) => return Err(self.io_error(error)),
        };

        self.terminate_last_line(&file)?;
        self.write_row(&file, &[name, email, department, status.as_str()])
    }

    /// Data rows in file order, header excluded.
    pub fn read_rows(&self) -> Result<Vec<InternRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(StorageError::StorageNotFound {
                    path: self.path.clone(),
                });
            }
            Err(error) => return Err(self.io_error(error)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers().map_err(|source| self.csv_error(source))?;
        if headers.iter().ne(HEADER) {
            return Err(StorageError::InvalidHeader {
                path: self.path.clone(),
                found: headers.iter().map(str::to_string).collect(),
            });
        }

        reader
            .deserialize::<InternRecord>()
            .map(|row| row.map_err(|source| self.csv_error(source)))
            .collect()
    }

    pub fn row_count(&self) -> Result<usize> {
        Ok(self.read_rows()?.len())
    }

    // A table edited by hand may lack the final newline; the next row must not
    // be glued onto the last line.
    fn terminate_last_line(&self, mut file: &File) -> Result<()> {
        let len = file
            .metadata()
            .map_err(|source| self.io_error(source))?
            .len();
        if len == 0 {
            return Ok(());
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|source| self.io_error(source))?;
        if last[0] != b'\n' {
            debug!(path = %self.path.display(), "terminating unterminated last line");
            file.write_all(b"\n")
                .map_err(|source| self.io_error(source))?;
        }
        Ok(())
    }

    fn write_row(&self, file: &File, fields: &[&str]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(fields)
            .map_err(|source| self.csv_error(source))?;
        writer.flush().map_err(|source| self.io_error(source))?;
        drop(writer);
        file.sync_all().map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> StorageError {
        StorageError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl RegistrationSink for TabularSink {
    fn append(&self, record: &InternRecord) -> Result<()> {
        self.append_row(&record.name, &record.email, &record.department, record.status)
    }
}

