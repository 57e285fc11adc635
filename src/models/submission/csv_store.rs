//! Flat-file submission log: one CSV row per download, header on first line.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use super::types::{NewSubmission, SubmissionRecord};
use crate::errors::SinkError;

pub const HEADER: [&str; 5] = ["timestamp_utc", "name", "email", "mobile", "pdf_requested"];

/// Create the file with its header row unless it already exists.
/// Returns true when the file was created by this call.
pub fn ensure_file(path: &Path) -> Result<bool, SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADER)?;
    writer.flush()?;
    Ok(true)
}

/// Append one row. The row is encoded up front and written with a single
/// `write_all` on an append-mode handle so concurrent appenders never interleave.
pub fn append(path: &Path, record: &SubmissionRecord) -> Result<(), SinkError> {
    let row = encode_row(record)?;
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(&row)?;
    file.flush()?;
    Ok(())
}

/// Number of data rows (header excluded). A missing file counts as empty.
pub fn count(path: &Path) -> Result<i64, SinkError> {
    if !path.exists() {
        return Ok(0);
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = 0;
    for row in reader.records() {
        row?;
        rows += 1;
    }
    Ok(rows)
}

/// Read every recorded row back, oldest first.
pub fn read_all(path: &Path) -> Result<Vec<SubmissionRecord>, SinkError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        let timestamp = DateTime::parse_from_rfc3339(&field(0))
            .map_err(|e| SinkError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?
            .with_timezone(&Utc);
        let submission = NewSubmission {
            name: field(1),
            email: field(2),
            mobile: field(3),
        };
        records.push(SubmissionRecord::at(timestamp, submission, field(4)));
    }
    Ok(records)
}

fn encode_row(record: &SubmissionRecord) -> Result<Vec<u8>, SinkError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record([
        record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true).as_str(),
        record.name.as_str(),
        record.email.as_str(),
        record.mobile.as_str(),
        record.requested_document.as_str(),
    ])?;
    writer
        .into_inner()
        .map_err(|e| SinkError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample(name: &str) -> SubmissionRecord {
        SubmissionRecord::at(
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            NewSubmission {
                name: name.to_string(),
                email: "lead@example.com".to_string(),
                mobile: "555-0100".to_string(),
            },
            "Cutter compactor.pdf".to_string(),
        )
    }

    #[test]
    fn ensure_file_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("submissions.csv");
        assert!(ensure_file(&path).unwrap());
        assert!(!ensure_file(&path).unwrap());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "timestamp_utc,name,email,mobile,pdf_requested\n");
        assert_eq!(count(&path).unwrap(), 0);
    }

    #[test]
    fn quoted_fields_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("submissions.csv");
        ensure_file(&path).unwrap();
        append(&path, &sample("Smith, \"Jo\"\nJr")).unwrap();

        let rows = read_all(&path).unwrap();
        assert_eq!(rows, vec![sample("Smith, \"Jo\"\nJr")]);
    }

    #[test]
    fn missing_file_counts_as_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(count(&dir.path().join("absent.csv")).unwrap(), 0);
    }

    #[test]
    fn append_without_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = append(&dir.path().join("absent.csv"), &sample("Ada")).unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
    }
}
