//! Download HTTP handlers.
//!
//! ```text
//! POST /api/v1/users/{user_id}/downloads/{resource_id}
//! GET  /api/v1/users/{user_id}/downloads
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{DownloadError, DownloaderRepositoryError, UserLimitSourceError};
use crate::domain::{DomainError, ResourceDownloader};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_resource_id, parse_user_id};

/// Response payload for a registered download.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub user_id: String,
    pub resource_id: String,
    /// Downloads registered so far, this one included.
    pub downloaded: usize,
    pub limit: u32,
    pub remaining: u32,
}

/// Response payload describing a user's download history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadsResponse {
    pub user_id: String,
    pub resources: Vec<String>,
    pub limit: u32,
    pub remaining: u32,
}

impl From<ResourceDownloader> for DownloadsResponse {
    fn from(value: ResourceDownloader) -> Self {
        Self {
            user_id: value.user_id().to_string(),
            resources: value.resources().iter().map(ToString::to_string).collect(),
            limit: value.limit(),
            remaining: value.remaining(),
        }
    }
}

/// Translate a use case failure into the HTTP error payload.
///
/// A user the limit service does not know is reported as `404`; any other
/// limit service failure is `503`. Storage failures become internal errors
/// and are redacted on the way out.
pub(crate) fn map_download_error(error: DownloadError) -> DomainError {
    match error {
        DownloadError::LimitReached(reached) => {
            DomainError::limit_reached(reached.to_string()).with_details(json!({
                "userId": reached.user_id.as_str(),
                "limit": reached.limit,
            }))
        }
        DownloadError::Repository(DownloaderRepositoryError::NotFound { user_id })
        | DownloadError::Repository(DownloaderRepositoryError::ExternalService {
            source: UserLimitSourceError::NotFound { user_id },
        }) => DomainError::not_found(format!("user {user_id} not found")),
        DownloadError::Repository(DownloaderRepositoryError::ExternalService { source }) => {
            warn!(error = %source, "user limit service failed");
            DomainError::service_unavailable("user limit service unavailable")
        }
        DownloadError::Repository(other) => DomainError::internal(other.to_string()),
    }
}

/// Register one download of `resource_id` for `user_id`.
#[post("/users/{user_id}/downloads/{resource_id}")]
pub async fn register_download(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<DownloadResponse>> {
    let (raw_user_id, raw_resource_id) = path.into_inner();
    let user_id = parse_user_id(raw_user_id)?;
    let resource_id = parse_resource_id(raw_resource_id)?;

    let downloader = state
        .downloads
        .download_resource(&user_id, resource_id.clone())
        .await
        .map_err(map_download_error)?;

    debug!(user_id = %user_id, resource_id = %resource_id, "download registered over HTTP");
    Ok(web::Json(DownloadResponse {
        user_id: user_id.to_string(),
        resource_id: resource_id.to_string(),
        downloaded: downloader.resources().len(),
        limit: downloader.limit(),
        remaining: downloader.remaining(),
    }))
}

/// List the downloads registered for `user_id`.
#[get("/users/{user_id}/downloads")]
pub async fn list_downloads(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DownloadsResponse>> {
    let user_id = parse_user_id(path.into_inner())?;
    let downloader = state
        .downloads_query
        .fetch_downloads(&user_id)
        .await
        .map_err(map_download_error)?;
    Ok(web::Json(DownloadsResponse::from(downloader)))
}

/// Mount the download handlers on a service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_download).service(list_downloads);
}

#[cfg(test)]
#[path = "downloads_tests.rs"]
mod tests;
