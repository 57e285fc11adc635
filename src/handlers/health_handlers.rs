use actix_web::{HttpResponse, web};
use chrono::{SecondsFormat, Utc};

use crate::api_types::{HealthResponse, SinkCheckResponse};
use crate::recorder::Recorder;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// GET /db-check
/// Can the service reach its submissions sink, and how many rows does it hold?
pub async fn db_check(recorder: web::Data<Recorder>) -> HttpResponse {
    match recorder.count().await {
        Ok(rows) => HttpResponse::Ok().json(SinkCheckResponse {
            ok: true,
            rows: Some(rows),
            ..Default::default()
        }),
        Err(e) if e.is_unavailable() => {
            log::warn!("Sink check: {e}");
            HttpResponse::Ok().json(SinkCheckResponse {
                ok: false,
                message: Some("no sink connection".to_string()),
                ..Default::default()
            })
        }
        Err(e) => {
            log::error!("Sink check failed: {e}");
            HttpResponse::InternalServerError().json(SinkCheckResponse {
                ok: false,
                error: Some(e.to_string()),
                ..Default::default()
            })
        }
    }
}
