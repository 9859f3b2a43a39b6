//! Driving port for reading a user's download allowance.

use async_trait::async_trait;

use crate::domain::{ResourceDownloader, UserId};

use super::DownloadError;

/// Use case: read a user's download history and limit.
///
/// Goes through the same repository as [`super::DownloadCommand`], so the
/// first read for a user may populate the cache from the user service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadQuery: Send + Sync {
    async fn fetch_downloads(&self, user_id: &UserId)
    -> Result<ResourceDownloader, DownloadError>;
}
