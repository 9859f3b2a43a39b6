//! Cache key naming for stored downloaders.
use crate::domain::UserId;

/// Namespace prepended to every downloader cache key.
pub const DOWNLOADER_KEY_PREFIX: &str = "downloader:";

/// Key under which a user's downloader is stored: `downloader:<user_id>`.
///
/// Built from a validated [`UserId`], so it is never blank and never carries
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloaderCacheKey(String);

impl DownloaderCacheKey {
    /// Build the cache key for `user_id`.
    pub fn for_user(user_id: &UserId) -> Self {
        Self(format!("{DOWNLOADER_KEY_PREFIX}{user_id}"))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for DownloaderCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DownloaderCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user1", "downloader:user1")]
    #[case("a:b", "downloader:a:b")]
    fn key_is_prefixed_user_id(#[case] raw: &str, #[case] expected: &str) {
        let user_id = UserId::new(raw).expect("valid user id");
        let key = DownloaderCacheKey::for_user(&user_id);
        assert_eq!(key.as_str(), expected);
        assert_eq!(key.to_string(), expected);
    }
}
