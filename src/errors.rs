use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::api_types::MessageResponse;

/// Errors that terminate a request. Each maps to a JSON `{message}` response.
#[derive(Debug)]
pub enum AppError {
    /// Body missing, not JSON, or of the wrong shape.
    BadRequest(String),
    /// A required field is empty or too long.
    Validation(String),
    /// No document could be resolved.
    NotFound(String),
    /// Reading the resolved file failed.
    Streaming(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::Streaming(e) => write!(f, "Streaming error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Streaming(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::BadRequest(msg) | AppError::Validation(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Streaming(_) => {
                log::error!("{self}");
                "Internal server error while sending file.".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(MessageResponse { message })
    }
}

/// Why the resolver produced no document.
#[derive(Debug)]
pub enum ResolveError {
    /// Assets directory missing or holding no allowed file.
    NotFound,
    /// Assets path exists but could not be listed.
    Io(std::io::Error),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound => write!(f, "No document available"),
            ResolveError::Io(e) => write!(f, "Assets directory unreadable: {e}"),
        }
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(e: std::io::Error) -> Self {
        ResolveError::Io(e)
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound => AppError::NotFound("Requested PDF not found on server.".to_string()),
            ResolveError::Io(e) => AppError::Streaming(e),
        }
    }
}

/// Failures of the submission sink. Never surfaced to the client.
#[derive(Debug)]
pub enum SinkError {
    /// Postgres settings incomplete.
    Unconfigured,
    /// Recording switched off.
    Disabled,
    /// Connecting took longer than the connect timeout.
    Timeout,
    /// Could not open a connection.
    Connect(sqlx::Error),
    /// Statement failed on an open connection.
    Db(sqlx::Error),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl SinkError {
    /// Level to log a failed write at. A disabled sink is expected, not a fault.
    pub fn log_level(&self) -> log::Level {
        match self {
            SinkError::Disabled => log::Level::Debug,
            _ => log::Level::Warn,
        }
    }

    /// True when the sink could not be reached at all, as opposed to a failing write.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            SinkError::Unconfigured | SinkError::Disabled | SinkError::Timeout | SinkError::Connect(_)
        )
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Unconfigured => write!(f, "DB not configured (DB_HOST/DB_USER/DB_NAME missing)"),
            SinkError::Disabled => write!(f, "Submission recording disabled"),
            SinkError::Timeout => write!(f, "Timed out connecting to PostgreSQL"),
            SinkError::Connect(e) => write!(f, "Failed to connect to PostgreSQL: {e}"),
            SinkError::Db(e) => write!(f, "Database error: {e}"),
            SinkError::Io(e) => write!(f, "File error: {e}"),
            SinkError::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for SinkError {}

impl From<sqlx::Error> for SinkError {
    fn from(e: sqlx::Error) -> Self {
        SinkError::Db(e)
    }
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<csv::Error> for SinkError {
    fn from(e: csv::Error) -> Self {
        SinkError::Csv(e)
    }
}
