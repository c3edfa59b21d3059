//! The diagnostic error log.
//!
//! Commands record every error they return here, together with whatever
//! context they had at the time (service id, version, resource name). The
//! binary appends the records to `<config home>/errors.log` when a command
//! fails, so a user filing a bug report has something to attach.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{EdgeError, EdgeErrorCode};

/// The log file is truncated once it grows past this many bytes.
pub const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Extra key/value pairs attached to a record.
pub type ErrContext = BTreeMap<String, String>;

/// Context identifying the service target an error happened against.
pub fn service_context(service_id: Option<&str>, service_version: Option<u32>) -> ErrContext {
    let mut context = ErrContext::new();
    context.insert(
        "Service ID".to_string(),
        service_id.unwrap_or_default().to_string(),
    );
    context.insert(
        "Service Version".to_string(),
        service_version.map(|v| v.to_string()).unwrap_or_default(),
    );
    context
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrRecord {
    pub time: DateTime<Utc>,
    pub code: Option<EdgeErrorCode>,
    pub message: String,
    pub context: ErrContext,
}

#[derive(Debug, Default)]
pub struct ErrLog {
    records: RefCell<Vec<ErrRecord>>,
}

impl ErrLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, error: &EdgeError) {
        self.add_with_context(error, ErrContext::new());
    }

    pub fn add_with_context(&self, error: &EdgeError, context: ErrContext) {
        tracing::debug!(message = %error.message(), ?context, "recording error");
        self.records.borrow_mut().push(ErrRecord {
            time: Utc::now(),
            code: error.code(),
            message: error.message(),
            context,
        });
    }

    pub fn records(&self) -> Vec<ErrRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Appends all records to the file at `path`, starting the file over
    /// when it has grown past [`MAX_LOG_SIZE`].
    pub fn persist(&self, path: &Utf8Path) -> io::Result<()> {
        let records = self.records.borrow();
        if records.is_empty() {
            return Ok(());
        }

        let truncate = fs::metadata(path)
            .map(|m| m.len() > MAX_LOG_SIZE)
            .unwrap_or(false);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(!truncate)
            .truncate(truncate)
            .open(path)?;

        for record in records.iter() {
            write_record(&mut file, record)?;
        }
        Ok(())
    }
}

fn write_record(out: &mut dyn Write, record: &ErrRecord) -> io::Result<()> {
    let code = record
        .code
        .as_ref()
        .map(|c| format!("[{c}] "))
        .unwrap_or_default();
    writeln!(out, "{} {}{}", record.time.to_rfc3339(), code, record.message)?;
    for (key, value) in &record.context {
        writeln!(out, "\t{key}: {value}")?;
    }
    writeln!(out)
}
