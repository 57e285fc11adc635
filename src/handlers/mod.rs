pub mod download_handlers;
pub mod health_handlers;

use actix_web::{HttpResponse, web};

use crate::api_types::MessageResponse;
use crate::errors::AppError;

/// Wrong Content-Type, missing body and malformed JSON all answer 400 with
/// the same `{message}`. Content-Type matching (case, `+json` suffixes) is
/// left to `web::Json`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::info!("Rejected download body: {err}");
        AppError::BadRequest("Expected JSON body".to_string()).into()
    })
}

/// Register all routes. The caller installs `not_found` as the default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handlers::health))
        .route("/db-check", web::get().to(health_handlers::db_check))
        .service(
            web::resource("/download")
                .app_data(json_config())
                .route(web::post().to(download_handlers::download)),
        );
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse {
        message: "Not found".to_string(),
    })
}
