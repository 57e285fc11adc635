use actix_files::NamedFile;
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{HttpRequest, HttpResponse, mime, web};

use crate::api_types::DownloadRequest;
use crate::errors::AppError;
use crate::models::submission::{NewSubmission, SubmissionRecord};
use crate::recorder::Recorder;
use crate::resolver::{ResolvedDocument, Resolver};

/// POST /download
/// Validate the requester, resolve the document, record the lead (best-effort)
/// and send the file as an attachment.
pub async fn download(
    req: HttpRequest,
    resolver: web::Data<Resolver>,
    recorder: web::Data<Recorder>,
    body: web::Json<DownloadRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let pdf_key = body.pdf.as_deref().unwrap_or("").trim();

    log::info!(
        "Download request: name={} email={} mobile={} pdf_key={}",
        body.name.as_deref().unwrap_or("").trim(),
        body.email.as_deref().unwrap_or("").trim(),
        body.mobile.as_deref().unwrap_or("").trim(),
        if pdf_key.is_empty() { "(empty)" } else { pdf_key }
    );

    let submission = NewSubmission::parse(&body).inspect_err(|e| log::info!("{e}"))?;

    let document = resolver
        .resolve(Some(pdf_key))
        .inspect_err(|e| log::error!("PDF not found for key={pdf_key}: {e}"))?;

    let record = SubmissionRecord::new(submission, &document);
    if let Err(e) = recorder.record(&record).await {
        log::log!(e.log_level(), "Submission not recorded; serving {} anyway", document.file_name);
    }

    serve(&req, &document).await
}

/// Send `document` as an attachment under its on-disk name.
pub async fn serve(req: &HttpRequest, document: &ResolvedDocument) -> Result<HttpResponse, AppError> {
    let file = NamedFile::open_async(&document.path)
        .await
        .map_err(AppError::Streaming)?;

    let content_type = if *file.content_type() == mime::APPLICATION_OCTET_STREAM {
        mime::APPLICATION_PDF
    } else {
        file.content_type().clone()
    };

    log::info!("Serving file: {}", document.file_name);
    Ok(file
        .set_content_type(content_type)
        .set_content_disposition(attachment(&document.file_name))
        .into_response(req))
}

/// `attachment; filename="..."`, plus an RFC 5987 `filename*` for non-ASCII names.
fn attachment(file_name: &str) -> ContentDisposition {
    let mut parameters = vec![DispositionParam::Filename(file_name.to_string())];
    if !file_name.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: file_name.as_bytes().to_vec(),
        }));
    }
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_name_has_plain_filename_only() {
        let cd = attachment("Air-Cool .pdf");
        assert_eq!(cd.to_string(), "attachment; filename=\"Air-Cool .pdf\"");
    }

    #[test]
    fn non_ascii_name_adds_extended_filename() {
        let cd = attachment("Broschüre.pdf");
        let header = cd.to_string();
        assert!(header.starts_with("attachment; filename=\"Broschüre.pdf\""), "{header}");
        assert!(header.contains("filename*=UTF-8''Brosch%C3%BCre.pdf"), "{header}");
    }
}
