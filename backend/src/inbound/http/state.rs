//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! the driving ports, so they can be tested without Redis or the user
//! service.

use std::sync::Arc;

use crate::domain::ports::{DownloadCommand, DownloadQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub downloads: Arc<dyn DownloadCommand>,
    pub downloads_query: Arc<dyn DownloadQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use resource_downloader::domain::DownloadService;
    /// use resource_downloader::inbound::http::state::HttpState;
    /// use resource_downloader::outbound::memory::InMemoryDownloaderRepository;
    ///
    /// let service = Arc::new(DownloadService::new(Arc::new(
    ///     InMemoryDownloaderRepository::new(),
    /// )));
    /// let state = HttpState::new(service.clone(), service);
    /// let _downloads = state.downloads.clone();
    /// ```
    pub fn new(downloads: Arc<dyn DownloadCommand>, downloads_query: Arc<dyn DownloadQuery>) -> Self {
        Self {
            downloads,
            downloads_query,
        }
    }
}
