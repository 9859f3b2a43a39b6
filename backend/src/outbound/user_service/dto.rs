//! DTO for decoding the user service's limit payload.

use serde::Deserialize;

use crate::domain::UserId;
use crate::domain::ports::UserLimit;

/// Body of `GET /users/{user_id}`: `{"user_id": "...", "limit": 10}`.
#[derive(Debug, Deserialize)]
pub(super) struct UserLimitDto {
    pub(super) user_id: String,
    pub(super) limit: u32,
}

impl UserLimitDto {
    pub(super) fn into_domain(self) -> Result<UserLimit, String> {
        let user_id = UserId::new(self.user_id)
            .map_err(|err| format!("invalid user_id in response: {err}"))?;
        Ok(UserLimit {
            user_id,
            limit: self.limit,
        })
    }
}
