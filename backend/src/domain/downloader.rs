//! Per-user download allowance aggregate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ResourceId, UserId};

/// Raised when registering a download would exceed the user's limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("download limit of {limit} reached for user {user_id}")]
pub struct LimitReached {
    /// User whose allowance is exhausted.
    pub user_id: UserId,
    /// Limit that was hit.
    pub limit: u32,
}

/// Downloads registered for one user together with the user's limit.
///
/// ## Invariants
/// - `resources().len() <= limit()` after every call to
///   [`ResourceDownloader::register_download`]; a registration that would
///   break this is rejected without touching `resources`.
/// - `user_id` and `limit` never change once the entity exists.
/// - Resource order is download order. Repeated ids are kept and each one
///   counts against the limit.
///
/// The serde shape is the flat object stored in the cache:
/// `{"user_id": "...", "resources": ["..."], "limit": 5}`.
///
/// # Examples
/// ```
/// use resource_downloader::domain::{ResourceDownloader, ResourceId, UserId};
///
/// let user_id = UserId::new("user-1").expect("valid user id");
/// let mut downloader = ResourceDownloader::fresh(user_id, 1);
/// let resource = ResourceId::new("report.pdf").expect("valid resource id");
///
/// assert!(downloader.register_download(resource.clone()).is_ok());
/// assert!(downloader.register_download(resource).is_err());
/// assert_eq!(downloader.resources().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDownloader {
    user_id: UserId,
    resources: Vec<ResourceId>,
    limit: u32,
}

impl ResourceDownloader {
    /// Build an entity with an explicit download history.
    ///
    /// The history is taken as-is. A list already longer than `limit` is
    /// kept; it simply rejects every further registration.
    pub fn new(user_id: UserId, resources: Vec<ResourceId>, limit: u32) -> Self {
        Self {
            user_id,
            resources,
            limit,
        }
    }

    /// Build an entity with no downloads yet.
    pub fn fresh(user_id: UserId, limit: u32) -> Self {
        Self::new(user_id, Vec::new(), limit)
    }

    /// User owning this download history.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Downloaded resource ids, oldest first.
    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }

    /// Maximum number of registrations allowed.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Registrations still permitted before the limit is reached.
    pub fn remaining(&self) -> u32 {
        let used = u32::try_from(self.resources.len()).unwrap_or(u32::MAX);
        self.limit.saturating_sub(used)
    }

    /// Whether another registration would be rejected.
    pub fn is_limit_reached(&self) -> bool {
        self.remaining() == 0
    }

    /// Record a download of `resource_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LimitReached`] when the user has no allowance left. The
    /// resource list is left unchanged in that case.
    pub fn register_download(&mut self, resource_id: ResourceId) -> Result<(), LimitReached> {
        if self.is_limit_reached() {
            return Err(LimitReached {
                user_id: self.user_id.clone(),
                limit: self.limit,
            });
        }
        self.resources.push(resource_id);
        Ok(())
    }
}
