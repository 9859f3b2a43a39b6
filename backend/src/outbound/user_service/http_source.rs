//! Reqwest-backed user limit source.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into the domain `UserLimit`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::UserLimitDto;
use crate::domain::UserId;
use crate::domain::ports::{UserLimit, UserLimitSource, UserLimitSourceError};

const DEFAULT_USER_AGENT: &str = "resource-downloader/0.1";

/// User limit source performing `GET {base_url}/users/{user_id}`.
#[derive(Debug, Clone)]
pub struct HttpUserLimitSource {
    client: Client,
    base_url: Url,
}

impl HttpUserLimitSource {
    /// Build a source using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn user_url(&self, user_id: &UserId) -> Result<Url, UserLimitSourceError> {
        user_url(&self.base_url, user_id)
    }
}

#[async_trait]
impl UserLimitSource for HttpUserLimitSource {
    async fn fetch_limit(&self, user_id: &UserId) -> Result<UserLimit, UserLimitSourceError> {
        let url = self.user_url(user_id)?;
        debug!(user_id = %user_id, url = %url, "fetching user limit");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(user_id, status, body.as_ref()));
        }

        parse_user_limit(body.as_ref())
    }
}

fn user_url(base_url: &Url, user_id: &UserId) -> Result<Url, UserLimitSourceError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            UserLimitSourceError::transport(format!("base URL {base_url} cannot carry a path"))
        })?
        .pop_if_empty()
        .push("users")
        .push(user_id.as_str());
    Ok(url)
}

fn parse_user_limit(body: &[u8]) -> Result<UserLimit, UserLimitSourceError> {
    let decoded: UserLimitDto = serde_json::from_slice(body).map_err(|error| {
        UserLimitSourceError::decode(format!("invalid user limit JSON payload: {error}"))
    })?;
    decoded.into_domain().map_err(UserLimitSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> UserLimitSourceError {
    if error.is_timeout() {
        UserLimitSourceError::timeout(error.to_string())
    } else {
        UserLimitSourceError::transport(error.to_string())
    }
}

fn map_status_error(user_id: &UserId, status: StatusCode, body: &[u8]) -> UserLimitSourceError {
    match status {
        StatusCode::NOT_FOUND => UserLimitSourceError::not_found(user_id.as_str()),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UserLimitSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => UserLimitSourceError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
