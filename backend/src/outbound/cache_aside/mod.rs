//! Cache-aside downloader repository.
//!
//! The external user service issues limits but keeps no download history, so
//! the cache is both the fast path and the only durable record of downloads:
//!
//! - `get` reads the cache; on any cache failure it fetches the limit from
//!   the user service, builds an empty downloader, writes it back best-effort
//!   and returns it.
//! - `save` writes through to the cache and surfaces cache failures.
//!
//! A lost best-effort write only costs one more limit lookup later. A lost
//! `save` would drop a registered download, so that one is never swallowed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{DownloaderRepository, DownloaderRepositoryError, UserLimitSource};
use crate::domain::{ResourceDownloader, UserId};

/// Repository decorator combining a downloader cache with a limit source.
///
/// Both collaborators are injected and shared; this type never builds or
/// tears them down.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use resource_downloader::domain::ports::{DownloaderRepository, FixtureUserLimitSource};
/// use resource_downloader::domain::UserId;
/// use resource_downloader::outbound::cache_aside::CachedExternalDownloaderRepository;
/// use resource_downloader::outbound::memory::InMemoryDownloaderRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repository = CachedExternalDownloaderRepository::new(
///     Arc::new(InMemoryDownloaderRepository::new()),
///     Arc::new(FixtureUserLimitSource::new(10)),
/// );
/// let user_id = UserId::new("u1").expect("valid user id");
/// let downloader = repository.get(&user_id).await.expect("limit fetched");
/// assert_eq!(downloader.limit(), 10);
/// # });
/// ```
pub struct CachedExternalDownloaderRepository<C, S> {
    cache: Arc<C>,
    source: Arc<S>,
}

impl<C, S> CachedExternalDownloaderRepository<C, S> {
    pub fn new(cache: Arc<C>, source: Arc<S>) -> Self {
        Self { cache, source }
    }
}

impl<C, S> Clone for CachedExternalDownloaderRepository<C, S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            source: Arc::clone(&self.source),
        }
    }
}

impl<C, S> CachedExternalDownloaderRepository<C, S>
where
    C: DownloaderRepository,
    S: UserLimitSource,
{
    async fn create_from_source(
        &self,
        user_id: &UserId,
    ) -> Result<ResourceDownloader, DownloaderRepositoryError> {
        let user_limit = self
            .source
            .fetch_limit(user_id)
            .await
            .map_err(DownloaderRepositoryError::external_service)?;

        let downloader = ResourceDownloader::fresh(user_id.clone(), user_limit.limit);
        if let Err(error) = self.cache.save(&downloader).await {
            warn!(
                user_id = %user_id,
                error = %error,
                "failed to cache new downloader; it will be rebuilt on next access"
            );
        }
        Ok(downloader)
    }
}

#[async_trait]
impl<C, S> DownloaderRepository for CachedExternalDownloaderRepository<C, S>
where
    C: DownloaderRepository,
    S: UserLimitSource,
{
    async fn get(&self, user_id: &UserId) -> Result<ResourceDownloader, DownloaderRepositoryError> {
        match self.cache.get(user_id).await {
            Ok(downloader) => return Ok(downloader),
            Err(error) if error.is_not_found() => {
                debug!(user_id = %user_id, "downloader cache miss");
            }
            Err(error) => {
                warn!(
                    user_id = %user_id,
                    error = %error,
                    "downloader cache read failed; falling back to user service"
                );
            }
        }
        self.create_from_source(user_id).await
    }

    async fn save(&self, downloader: &ResourceDownloader) -> Result<(), DownloaderRepositoryError> {
        self.cache.save(downloader).await
    }
}

#[cfg(test)]
mod tests;
