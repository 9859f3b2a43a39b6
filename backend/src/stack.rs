//! Adapter assembly shared by the HTTP server and the CLI.
//!
//! Builds the Redis pool and the user service client from
//! [`ServiceSettings`] and composes them into a [`DownloadService`]. The
//! returned service owns the only handles to those resources.

use std::sync::Arc;

use reqwest::Url;
use thiserror::Error;
use tracing::info;

use crate::domain::DownloadService;
use crate::outbound::cache::{RedisDownloaderRepository, RedisPool, RedisPoolConfig, RedisPoolError};
use crate::outbound::cache_aside::CachedExternalDownloaderRepository;
use crate::outbound::user_service::HttpUserLimitSource;
use crate::settings::ServiceSettings;

/// Repository used in production: Redis in front of the user limit service.
pub type ProductionRepository =
    CachedExternalDownloaderRepository<RedisDownloaderRepository, HttpUserLimitSource>;

/// Download service wired against [`ProductionRepository`].
pub type ProductionDownloadService = DownloadService<ProductionRepository>;

/// Failures while assembling the adapters.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("invalid user service URL {url}: {message}")]
    UserServiceUrl { url: String, message: String },
    #[error("failed to build user service client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Redis(#[from] RedisPoolError),
}

/// Parse the configured user service base URL.
pub fn parse_user_service_url(raw: &str) -> Result<Url, StackError> {
    Url::parse(raw).map_err(|err| StackError::UserServiceUrl {
        url: raw.to_owned(),
        message: err.to_string(),
    })
}

/// Connect every adapter described by `settings`.
///
/// # Errors
///
/// Returns [`StackError`] when the user service URL is malformed, the HTTP
/// client cannot be built, or the Redis pool cannot be created.
pub async fn build_download_service(
    settings: &ServiceSettings,
) -> Result<ProductionDownloadService, StackError> {
    let base_url = parse_user_service_url(&settings.user_service_url)?;
    let source = HttpUserLimitSource::new(base_url, settings.user_service_timeout())?;

    let pool = RedisPool::new(
        RedisPoolConfig::new(settings.redis_url.as_str())
            .with_max_size(settings.redis_pool_max_size)
            .with_connection_timeout(settings.redis_connection_timeout()),
    )
    .await?;
    info!(
        redis_url = %settings.redis_url,
        user_service_url = %settings.user_service_url,
        "download adapters ready"
    );

    let repository = CachedExternalDownloaderRepository::new(
        Arc::new(RedisDownloaderRepository::new(pool)),
        Arc::new(source),
    );
    Ok(DownloadService::new(Arc::new(repository)))
}
