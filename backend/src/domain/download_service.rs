//! Download registration service.
//!
//! Implements the driving ports on top of any [`DownloaderRepository`]. Each
//! call is one get, mutate, save sequence with no locking: two concurrent
//! downloads for the same user may both read the same state and the later
//! save wins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{DownloadCommand, DownloadError, DownloadQuery, DownloaderRepository};
use crate::domain::{ResourceDownloader, ResourceId, UserId};

/// Download service implementing [`DownloadCommand`] and [`DownloadQuery`].
#[derive(Clone)]
pub struct DownloadService<R> {
    repository: Arc<R>,
}

impl<R> DownloadService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DownloadCommand for DownloadService<R>
where
    R: DownloaderRepository,
{
    async fn download_resource(
        &self,
        user_id: &UserId,
        resource_id: ResourceId,
    ) -> Result<ResourceDownloader, DownloadError> {
        let mut downloader = self.repository.get(user_id).await?;

        if let Err(limit_reached) = downloader.register_download(resource_id.clone()) {
            debug!(
                user_id = %user_id,
                resource_id = %resource_id,
                limit = limit_reached.limit,
                "download rejected"
            );
            return Err(limit_reached.into());
        }

        // The transfer itself happens elsewhere; only the allowance is tracked.

        self.repository.save(&downloader).await?;
        info!(
            user_id = %user_id,
            resource_id = %resource_id,
            remaining = downloader.remaining(),
            "download registered"
        );
        Ok(downloader)
    }
}

#[async_trait]
impl<R> DownloadQuery for DownloadService<R>
where
    R: DownloaderRepository,
{
    async fn fetch_downloads(
        &self,
        user_id: &UserId,
    ) -> Result<ResourceDownloader, DownloadError> {
        Ok(self.repository.get(user_id).await?)
    }
}
