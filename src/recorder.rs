//! Best-effort recording of served downloads.
//!
//! The recorder never panics and never fails a request: every call returns a
//! `Result` the caller must look at, and every failure is logged here (as a
//! warning, or at debug level when recording is switched off). Handles (connections, files) are acquired and released within a
//! single call.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sqlx::postgres::PgConnectOptions;

use crate::config::SinkConfig;
use crate::db;
use crate::errors::SinkError;
use crate::models::submission::{SubmissionRecord, csv_store, queries};

#[derive(Debug)]
pub enum Recorder {
    Postgres { options: Option<PgConnectOptions> },
    Csv { path: PathBuf, write_lock: Mutex<()> },
    Disabled,
}

impl Recorder {
    pub fn from_config(sink: &SinkConfig) -> Self {
        match sink {
            SinkConfig::Postgres(db) => Recorder::postgres(db.connect_options()),
            SinkConfig::Csv { path } => Recorder::csv(path.clone()),
            SinkConfig::Disabled => Recorder::Disabled,
        }
    }

    /// Postgres sink. `None` means the connection settings are incomplete.
    pub fn postgres(options: Option<PgConnectOptions>) -> Self {
        Recorder::Postgres { options }
    }

    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Recorder::Csv { path: path.into(), write_lock: Mutex::new(()) }
    }

    /// Create the destination table or file if it is absent. Run once at startup.
    pub async fn ensure_destination(&self) -> Result<(), SinkError> {
        let result = match self {
            Recorder::Postgres { options } => ensure_table(options.as_ref()).await,
            Recorder::Csv { path, write_lock } => {
                let _guard = write_lock.lock().unwrap_or_else(|e| e.into_inner());
                csv_store::ensure_file(path).map(|created| {
                    if created {
                        log::info!("Created submissions file {}", path.display());
                    }
                })
            }
            Recorder::Disabled => Ok(()),
        };
        match &result {
            Ok(()) => log::info!("Ensured submissions destination exists."),
            Err(e) => log::error!("Cannot ensure submissions destination: {e}"),
        }
        result
    }

    /// Append one record.
    pub async fn record(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        let result = match self {
            Recorder::Postgres { options } => insert_row(options.as_ref(), record).await,
            Recorder::Csv { path, write_lock } => append_row(path, write_lock, record),
            Recorder::Disabled => Err(SinkError::Disabled),
        };
        match &result {
            Ok(()) => log::info!("Saved submission for {} <{}>", record.name, record.email),
            Err(e) => log::log!(e.log_level(), "Submission for <{}> not saved: {e}", record.email),
        }
        result
    }

    /// Number of recorded submissions.
    pub async fn count(&self) -> Result<i64, SinkError> {
        match self {
            Recorder::Postgres { options } => {
                let mut conn = db::connect(options.as_ref()).await?;
                let result = queries::count(&mut conn).await;
                db::release(conn).await;
                Ok(result?)
            }
            Recorder::Csv { path, .. } => csv_store::count(path),
            Recorder::Disabled => Err(SinkError::Disabled),
        }
    }
}

async fn ensure_table(options: Option<&PgConnectOptions>) -> Result<(), SinkError> {
    let mut conn = db::connect(options).await?;
    let result = queries::ensure_table(&mut conn).await;
    db::release(conn).await;
    Ok(result?)
}

async fn insert_row(options: Option<&PgConnectOptions>, record: &SubmissionRecord) -> Result<(), SinkError> {
    let mut conn = db::connect(options).await?;
    let result = queries::insert(&mut conn, record).await;
    db::release(conn).await;
    let id = result?;
    log::debug!("Inserted submission row {id}");
    Ok(())
}

fn append_row(path: &Path, write_lock: &Mutex<()>, record: &SubmissionRecord) -> Result<(), SinkError> {
    let _guard = write_lock.lock().unwrap_or_else(|e| e.into_inner());
    csv_store::ensure_file(path)?;
    csv_store::append(path, record)
}
