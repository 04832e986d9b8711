// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Write-only record sinks

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

/// Append-only destination for textual records
pub trait RecordSink: Send + Sync {
    /// Append one record; records are never read back or rewritten
    fn append(&self, record: &str) -> io::Result<()>;

    /// Where the records end up
    fn location(&self) -> &Path;
}

/// Text file opened, appended and closed on every record
#[derive(Debug, Clone)]
pub struct AppendFile {
    path: PathBuf,
}

impl AppendFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for AppendFile {
    fn append(&self, record: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.as_bytes())?;
        if !record.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        file.flush()?;
        trace!(path = ?self.path, bytes = record.len(), "record appended");
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
