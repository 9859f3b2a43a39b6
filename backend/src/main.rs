//! HTTP server entry-point for the download limit service.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use resource_downloader::inbound::http::downloads;
use resource_downloader::inbound::http::state::HttpState;
use resource_downloader::settings::ServiceSettings;
use resource_downloader::stack::build_download_service;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServiceSettings::load_from_iter(std::env::args_os()).wrap_err("load service settings")?;
    let service = Arc::new(
        build_download_service(&settings)
            .await
            .wrap_err("assemble download adapters")?,
    );
    let state = web::Data::new(HttpState::new(service.clone(), service));

    let bind_addr = settings.bind_addr.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(web::scope("/api/v1").configure(downloads::configure))
    })
    .bind(bind_addr.as_str())
    .wrap_err_with(|| format!("bind {bind_addr}"))?;

    info!(bind_addr = %bind_addr, "download service listening");
    server.run().await.wrap_err("run http server")
}
