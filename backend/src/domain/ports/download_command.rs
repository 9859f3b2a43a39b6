//! Driving port for registering downloads.
//!
//! Inbound adapters (HTTP handlers, the CLI) depend on these traits rather
//! than on the concrete service, so they can be exercised with mocks.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{LimitReached, ResourceDownloader, ResourceId, UserId};

use super::DownloaderRepositoryError;

/// Failure category of a download use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadErrorKind {
    /// No downloader exists for the user.
    NotFound,
    /// The user has no allowance left.
    LimitReached,
    /// The user limit service failed or does not know the user.
    ExternalService,
    /// The cache could not be read, written or decoded.
    Storage,
}

/// Errors returned by [`DownloadCommand`] and [`super::DownloadQuery`].
///
/// Repository failures are carried unchanged; nothing is translated on the
/// way up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error(transparent)]
    LimitReached(#[from] LimitReached),
    #[error(transparent)]
    Repository(#[from] DownloaderRepositoryError),
}

impl DownloadError {
    pub fn kind(&self) -> DownloadErrorKind {
        match self {
            Self::LimitReached(_) => DownloadErrorKind::LimitReached,
            Self::Repository(DownloaderRepositoryError::NotFound { .. }) => {
                DownloadErrorKind::NotFound
            }
            Self::Repository(DownloaderRepositoryError::ExternalService { .. }) => {
                DownloadErrorKind::ExternalService
            }
            Self::Repository(
                DownloaderRepositoryError::Storage { .. }
                | DownloaderRepositoryError::Serialization { .. },
            ) => DownloadErrorKind::Storage,
        }
    }
}

/// Use case: register one download for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadCommand: Send + Sync {
    /// Load the user's downloader, register `resource_id`, and persist it.
    ///
    /// Returns the downloader as persisted so callers can report the
    /// remaining allowance.
    async fn download_resource(
        &self,
        user_id: &UserId,
        resource_id: ResourceId,
    ) -> Result<ResourceDownloader, DownloadError>;
}
