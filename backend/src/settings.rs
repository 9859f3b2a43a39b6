//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional config file, `DOWNLOADER_*`
//! environment variables and command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_REDIS_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_REDIS_CONNECTION_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_USER_SERVICE_URL: &str = "http://localhost";
const DEFAULT_USER_SERVICE_TIMEOUT_MS: u64 = 5_000;

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_owned()
}

fn default_redis_url() -> String {
    DEFAULT_REDIS_URL.to_owned()
}

fn default_user_service_url() -> String {
    DEFAULT_USER_SERVICE_URL.to_owned()
}

/// Settings shared by the HTTP server and the `download-resource` CLI.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DOWNLOADER")]
pub struct ServiceSettings {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// Redis connection URL for the downloader cache.
    #[serde(default = "default_redis_url")]
    #[ortho_config(default = default_redis_url())]
    pub redis_url: String,
    /// Maximum number of pooled Redis connections.
    #[ortho_config(default = DEFAULT_REDIS_POOL_MAX_SIZE)]
    pub redis_pool_max_size: u32,
    /// Redis connection checkout timeout in milliseconds.
    #[ortho_config(default = DEFAULT_REDIS_CONNECTION_TIMEOUT_MS)]
    pub redis_connection_timeout_ms: u64,
    /// Base URL of the user limit service.
    #[serde(default = "default_user_service_url")]
    #[ortho_config(default = default_user_service_url())]
    pub user_service_url: String,
    /// Request timeout for the user limit service in milliseconds.
    #[ortho_config(default = DEFAULT_USER_SERVICE_TIMEOUT_MS)]
    pub user_service_timeout_ms: u64,
}

impl ServiceSettings {
    /// Redis checkout timeout as a [`Duration`].
    pub fn redis_connection_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_connection_timeout_ms)
    }

    /// User service request timeout as a [`Duration`].
    pub fn user_service_timeout(&self) -> Duration {
        Duration::from_millis(self.user_service_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "DOWNLOADER_BIND_ADDR",
        "DOWNLOADER_REDIS_URL",
        "DOWNLOADER_REDIS_POOL_MAX_SIZE",
        "DOWNLOADER_REDIS_CONNECTION_TIMEOUT_MS",
        "DOWNLOADER_USER_SERVICE_URL",
        "DOWNLOADER_USER_SERVICE_TIMEOUT_MS",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("resource-downloader")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(settings.redis_pool_max_size, 10);
        assert_eq!(settings.redis_connection_timeout(), Duration::from_secs(5));
        assert_eq!(settings.user_service_url, "http://localhost");
        assert_eq!(settings.user_service_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DOWNLOADER_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("DOWNLOADER_REDIS_URL", Some("redis://cache:6380".to_owned())),
            ("DOWNLOADER_REDIS_POOL_MAX_SIZE", Some("4".to_owned())),
            (
                "DOWNLOADER_REDIS_CONNECTION_TIMEOUT_MS",
                Some("250".to_owned()),
            ),
            (
                "DOWNLOADER_USER_SERVICE_URL",
                Some("http://users.internal".to_owned()),
            ),
            ("DOWNLOADER_USER_SERVICE_TIMEOUT_MS", Some("1500".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, "127.0.0.1:9000");
        assert_eq!(settings.redis_url, "redis://cache:6380");
        assert_eq!(settings.redis_pool_max_size, 4);
        assert_eq!(
            settings.redis_connection_timeout(),
            Duration::from_millis(250)
        );
        assert_eq!(settings.user_service_url, "http://users.internal");
        assert_eq!(
            settings.user_service_timeout(),
            Duration::from_millis(1500)
        );
    }

    #[rstest]
    fn unset_fields_keep_defaults_when_others_are_overridden() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "DOWNLOADER_REDIS_URL").then(|| "redis://cache:6380".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.redis_url, "redis://cache:6380");
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.user_service_url, "http://localhost");
        assert_eq!(settings.redis_pool_max_size, 10);
    }
}
