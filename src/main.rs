use actix_web::{App, HttpServer, middleware, web};

use leadgate::config::{self, AppConfig};
use leadgate::handlers;
use leadgate::recorder::Recorder;
use leadgate::resolver::Resolver;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let debug = config::parse_bool(std::env::var("DEBUG").ok().as_deref());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if debug { "debug" } else { "info" }),
    )
    .init();

    let config = AppConfig::from_env();
    config.log_summary();

    let resolver = web::Data::new(Resolver::from_config(&config));
    let recorder = web::Data::new(Recorder::from_config(&config.sink));

    // Best-effort: the server still starts if the sink is down.
    let _ = recorder.ensure_destination().await;

    log::info!("Starting server at http://{}:{}  DEBUG={}", config.host, config.port, config.debug);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(resolver.clone())
            .app_data(recorder.clone())
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
