//! Redis downloader cache.
//!
//! Stores each [`ResourceDownloader`] as compact JSON under
//! `downloader:<user_id>`. Keys are written with a plain `SET` and never
//! expire; the cache doubles as the durable record of download history.

mod pool;

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError};

use crate::domain::ports::{DownloaderCacheKey, DownloaderRepository, DownloaderRepositoryError};
use crate::domain::{ResourceDownloader, UserId};

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError};

/// Downloader repository backed by Redis.
#[derive(Clone)]
pub struct RedisDownloaderRepository {
    pool: RedisPool,
}

impl RedisDownloaderRepository {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DownloaderRepository for RedisDownloaderRepository {
    async fn get(&self, user_id: &UserId) -> Result<ResourceDownloader, DownloaderRepositoryError> {
        let key = DownloaderCacheKey::for_user(user_id);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Option<String> = conn.get(key.as_str()).await.map_err(map_redis_error)?;
        downloader_from_reply(user_id, raw)
    }

    async fn save(&self, downloader: &ResourceDownloader) -> Result<(), DownloaderRepositoryError> {
        let key = DownloaderCacheKey::for_user(downloader.user_id());
        let payload = encode_downloader(downloader)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.set::<_, _, ()>(key.as_str(), payload)
            .await
            .map_err(map_redis_error)
    }
}

/// A nil `GET` reply means the user has no cached downloader yet.
fn downloader_from_reply(
    user_id: &UserId,
    raw: Option<String>,
) -> Result<ResourceDownloader, DownloaderRepositoryError> {
    match raw {
        Some(payload) => decode_downloader(&payload),
        None => Err(DownloaderRepositoryError::not_found(user_id.as_str())),
    }
}

fn encode_downloader(downloader: &ResourceDownloader) -> Result<String, DownloaderRepositoryError> {
    serde_json::to_string(downloader).map_err(|err| {
        DownloaderRepositoryError::serialization(format!("encode downloader: {err}"))
    })
}

fn decode_downloader(payload: &str) -> Result<ResourceDownloader, DownloaderRepositoryError> {
    serde_json::from_str(payload).map_err(|err| {
        DownloaderRepositoryError::serialization(format!("decode downloader: {err}"))
    })
}

fn map_pool_error(error: RedisPoolError) -> DownloaderRepositoryError {
    DownloaderRepositoryError::storage(error.to_string())
}

fn map_redis_error(error: RedisError) -> DownloaderRepositoryError {
    DownloaderRepositoryError::storage(format!("redis command failed: {error}"))
}
