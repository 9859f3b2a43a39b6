//! Driven port for reading a user's download limit from the external user
//! service.
//!
//! The service is read-only from our point of view: it issues limits but
//! knows nothing about download history.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

/// Limit issued by the user service for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLimit {
    pub user_id: UserId,
    pub limit: u32,
}

define_port_error! {
    /// Errors surfaced while fetching a user's limit.
    pub enum UserLimitSourceError {
        /// The user service does not know this user.
        NotFound { user_id: String } =>
            "user {user_id} not found in user service",
        /// Request could not be sent or the connection failed mid-flight.
        Transport { message: String } =>
            "user service transport failed: {message}",
        /// Request exceeded the client timeout.
        Timeout { message: String } =>
            "user service timeout: {message}",
        /// User service answered with a non-success status.
        Status { status: u16, message: String } =>
            "user service returned status {status}: {message}",
        /// Response body could not be decoded into a limit.
        Decode { message: String } =>
            "user service response decode failed: {message}",
    }
}

/// Port for fetching per-user download limits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLimitSource: Send + Sync {
    /// Fetch the limit for `user_id`.
    async fn fetch_limit(&self, user_id: &UserId) -> Result<UserLimit, UserLimitSourceError>;
}

/// Fixture source that grants every user the same limit.
#[derive(Debug, Clone, Copy)]
pub struct FixtureUserLimitSource {
    limit: u32,
}

impl FixtureUserLimitSource {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }
}

#[async_trait]
impl UserLimitSource for FixtureUserLimitSource {
    async fn fetch_limit(&self, user_id: &UserId) -> Result<UserLimit, UserLimitSourceError> {
        Ok(UserLimit {
            user_id: user_id.clone(),
            limit: self.limit,
        })
    }
}
