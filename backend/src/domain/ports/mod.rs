//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod download_command;
mod download_query;
mod downloader_repository;
mod user_limit_source;

pub use cache_key::{DOWNLOADER_KEY_PREFIX, DownloaderCacheKey};
#[cfg(test)]
pub use download_command::MockDownloadCommand;
pub use download_command::{DownloadCommand, DownloadError, DownloadErrorKind};
#[cfg(test)]
pub use download_query::MockDownloadQuery;
pub use download_query::DownloadQuery;
#[cfg(test)]
pub use downloader_repository::MockDownloaderRepository;
pub use downloader_repository::{DownloaderRepository, DownloaderRepositoryError};
#[cfg(test)]
pub use user_limit_source::MockUserLimitSource;
pub use user_limit_source::{
    FixtureUserLimitSource, UserLimit, UserLimitSource, UserLimitSourceError,
};
