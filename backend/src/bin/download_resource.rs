//! Register a single download from the command line.
//!
//! Prints the outcome as `key=value` lines so scripts can consume it.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use resource_downloader::domain::ports::{DownloadCommand, DownloadErrorKind};
use resource_downloader::domain::{ResourceId, UserId};
use resource_downloader::settings::ServiceSettings;
use resource_downloader::stack::build_download_service;

/// `download-resource` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "download-resource",
    about = "Register one resource download against a user's limit",
    version
)]
struct CliArgs {
    /// User registering the download.
    #[arg(long = "user-id", value_name = "id", value_parser = parse_user_id)]
    user_id: UserId,
    /// Resource being downloaded.
    #[arg(long = "resource-id", value_name = "id", value_parser = parse_resource_id)]
    resource_id: ResourceId,
    /// Redis URL. Falls back to `DOWNLOADER_REDIS_URL` when omitted.
    #[arg(long = "redis-url", value_name = "url")]
    redis_url: Option<String>,
    /// User limit service base URL. Falls back to
    /// `DOWNLOADER_USER_SERVICE_URL` when omitted.
    #[arg(long = "user-service-url", value_name = "url")]
    user_service_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let service = build_download_service(&settings)
        .await
        .wrap_err("assemble download adapters")?;

    match service
        .download_resource(&args.user_id, args.resource_id.clone())
        .await
    {
        Ok(downloader) => {
            println!("status=downloaded");
            println!("user_id={}", downloader.user_id());
            println!("resource_id={}", args.resource_id);
            println!("downloaded={}", downloader.resources().len());
            println!("limit={}", downloader.limit());
            println!("remaining={}", downloader.remaining());
            Ok(())
        }
        Err(error) => {
            println!("status={}", status_label(error.kind()));
            println!("user_id={}", args.user_id);
            println!("resource_id={}", args.resource_id);
            Err(eyre!(error).wrap_err("download rejected"))
        }
    }
}

/// Load configuration and apply the URL overrides given on the command line.
fn resolve_settings(args: &CliArgs) -> Result<ServiceSettings> {
    let mut settings = ServiceSettings::load_from_iter([OsString::from("download-resource")])
        .wrap_err("load service settings")?;
    if let Some(redis_url) = &args.redis_url {
        settings.redis_url.clone_from(redis_url);
    }
    if let Some(user_service_url) = &args.user_service_url {
        settings.user_service_url.clone_from(user_service_url);
    }
    Ok(settings)
}

fn status_label(kind: DownloadErrorKind) -> &'static str {
    match kind {
        DownloadErrorKind::NotFound => "not_found",
        DownloadErrorKind::LimitReached => "limit_reached",
        DownloadErrorKind::ExternalService => "external_service_error",
        DownloadErrorKind::Storage => "storage_error",
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    UserId::new(raw).map_err(|err| err.to_string())
}

fn parse_resource_id(raw: &str) -> Result<ResourceId, String> {
    ResourceId::new(raw).map_err(|err| err.to_string())
}
