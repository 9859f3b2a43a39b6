//! Port for loading and storing per-user downloaders.
//!
//! The application service depends only on this contract. Adapters include
//! an in-memory map, a Redis cache, and the cache-aside decorator that fills
//! the cache from the user service. Callers can only tell them apart by error
//! kind and latency.

use async_trait::async_trait;

use crate::domain::{ResourceDownloader, UserId};

use super::{UserLimitSourceError, define_port_error};

define_port_error! {
    /// Errors raised by downloader repository adapters.
    pub enum DownloaderRepositoryError {
        /// No downloader is stored for the user.
        NotFound { user_id: String } =>
            "downloader for user {user_id} not found",
        /// The user service could not provide a limit for a new downloader.
        ExternalService { source: UserLimitSourceError } =>
            "user limit lookup failed: {source}",
        /// The backing store failed to read or write.
        Storage { message: String } =>
            "downloader storage failed: {message}",
        /// A stored downloader could not be encoded or decoded.
        Serialization { message: String } =>
            "downloader serialisation failed: {message}",
    }
}

impl DownloaderRepositoryError {
    /// Whether this error only reports an absent entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Storage contract for [`ResourceDownloader`] aggregates keyed by user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloaderRepository: Send + Sync {
    /// Load the downloader for `user_id`.
    ///
    /// Fails with [`DownloaderRepositoryError::NotFound`] when the adapter
    /// holds nothing for the user and has no way to create an entry.
    async fn get(&self, user_id: &UserId) -> Result<ResourceDownloader, DownloaderRepositoryError>;

    /// Insert or overwrite the whole downloader, keyed by its user id.
    async fn save(&self, downloader: &ResourceDownloader) -> Result<(), DownloaderRepositoryError>;
}
