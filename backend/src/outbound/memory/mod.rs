//! In-memory downloader repository.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{DownloaderRepository, DownloaderRepositoryError};
use crate::domain::{ResourceDownloader, UserId};

/// Downloader store backed by a `HashMap` behind a mutex.
///
/// Entries live as long as the repository. The lock is never held across an
/// await point.
#[derive(Debug, Default)]
pub struct InMemoryDownloaderRepository {
    entries: Mutex<HashMap<UserId, ResourceDownloader>>,
}

impl InMemoryDownloaderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored downloader.
    pub fn len(&self) -> Result<usize, DownloaderRepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DownloaderRepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<UserId, ResourceDownloader>>, DownloaderRepositoryError>
    {
        self.entries
            .lock()
            .map_err(|_| DownloaderRepositoryError::storage("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl DownloaderRepository for InMemoryDownloaderRepository {
    async fn get(&self, user_id: &UserId) -> Result<ResourceDownloader, DownloaderRepositoryError> {
        self.lock()?
            .get(user_id)
            .cloned()
            .ok_or_else(|| DownloaderRepositoryError::not_found(user_id.as_str()))
    }

    async fn save(&self, downloader: &ResourceDownloader) -> Result<(), DownloaderRepositoryError> {
        self.lock()?
            .insert(downloader.user_id().clone(), downloader.clone());
        Ok(())
    }
}
