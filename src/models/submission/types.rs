use chrono::{DateTime, Utc};

use crate::api_types::DownloadRequest;
use crate::errors::AppError;
use crate::resolver::ResolvedDocument;
use crate::validate;

/// Requester fields after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub mobile: String,
}

impl NewSubmission {
    /// Trim and validate the requester fields of a download request.
    pub fn parse(req: &DownloadRequest) -> Result<Self, AppError> {
        let name = trimmed(&req.name);
        let email = trimmed(&req.email);
        let mobile = trimmed(&req.mobile);

        if let Some(msg) = validate::validate_submission(&name, &email, &mobile) {
            return Err(AppError::Validation(msg));
        }

        Ok(NewSubmission { name, email, mobile })
    }
}

/// One served download, as written to the sink. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SubmissionRecord {
    #[sqlx(rename = "timestamp_utc")]
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[sqlx(rename = "pdf_requested")]
    pub requested_document: String,
}

impl SubmissionRecord {
    /// Stamp a validated submission with the document that is about to be served.
    pub fn new(submission: NewSubmission, document: &ResolvedDocument) -> Self {
        SubmissionRecord::at(Utc::now(), submission, document.file_name.clone())
    }

    pub fn at(timestamp: DateTime<Utc>, submission: NewSubmission, requested_document: String) -> Self {
        SubmissionRecord {
            timestamp,
            name: submission.name,
            email: submission.email,
            mobile: submission.mobile,
            requested_document,
        }
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}
