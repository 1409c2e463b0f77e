//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the feed client and the
//! procedure store. Nothing in this crate reads process-wide environment variables while handling a
//! request; binaries hand a key lookup to [`BoardConfig::from_lookup`] instead.

use crate::constants::{DEFAULT_DATABASE_PATH, DEFAULT_FEED_TIMEOUT_SECS};
use crate::error::{ConfigError, ConfigResult};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scheduling feed base URL.
pub const ENV_FEED_URL: &str = "CATHLIST";
/// Feed request timeout in whole seconds.
pub const ENV_FEED_TIMEOUT_SECS: &str = "ICL_FEED_TIMEOUT_SECS";
/// Disables TLS certificate verification against the feed.
pub const ENV_FEED_ACCEPT_INVALID_CERTS: &str = "ICL_FEED_ACCEPT_INVALID_CERTS";
/// Status code sent upstream as `sts`.
pub const ENV_FEED_STATUS_CODE: &str = "ICL_FEED_STATUS_CODE";
/// SQLite database holding `procedure_icl`.
pub const ENV_DATABASE_PATH: &str = "ICL_DATABASE_PATH";

/// Settings for the outbound scheduling feed.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    base_url: Url,
    timeout: Duration,
    accept_invalid_certs: bool,
    status_code: Option<String>,
}

impl FeedConfig {
    /// Create a feed configuration with default timeout, certificate verification on, and no
    /// status-code constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFeedUrl`] if `base_url` does not parse or is not http(s).
    pub fn new(base_url: &str) -> ConfigResult<Self> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidFeedUrl {
            value: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidFeedUrl {
                value: trimmed.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: parsed,
            timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
            accept_invalid_certs: false,
            status_code: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Constrain the upstream query with an `sts` value. Blank values clear the constraint.
    pub fn with_status_code(mut self, status_code: Option<String>) -> Self {
        self.status_code = status_code
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn status_code(&self) -> Option<&str> {
        self.status_code.as_deref()
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    feed: FeedConfig,
    database_path: PathBuf,
}

impl BoardConfig {
    /// Create a new `BoardConfig`.
    pub fn new(feed: FeedConfig, database_path: PathBuf) -> ConfigResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        Ok(Self {
            feed,
            database_path,
        })
    }

    /// Resolve the configuration from a key lookup, usually `|k| std::env::var(k).ok()`.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - the feed URL is missing or invalid,
    /// - the timeout is not a positive integer,
    /// - the certificate flag is not a recognised boolean.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = get(ENV_FEED_URL).ok_or(ConfigError::MissingFeedUrl(ENV_FEED_URL))?;
        let feed = FeedConfig::new(&base_url)?
            .with_timeout(timeout_from_env_value(get(ENV_FEED_TIMEOUT_SECS))?)
            .with_accept_invalid_certs(flag_from_env_value(
                ENV_FEED_ACCEPT_INVALID_CERTS,
                get(ENV_FEED_ACCEPT_INVALID_CERTS),
            )?)
            .with_status_code(get(ENV_FEED_STATUS_CODE));

        let database_path = get(ENV_DATABASE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        Self::new(feed, database_path)
    }

    pub fn feed(&self) -> &FeedConfig {
        &self.feed
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

/// Parse the feed timeout from an optional string value.
///
/// If `value` is `None`, returns the default timeout.
pub fn timeout_from_env_value(value: Option<String>) -> ConfigResult<Duration> {
    match value {
        None => Ok(Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS)),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidTimeout(raw)),
        },
    }
}

/// Parse a boolean flag. `None` is `false`.
pub fn flag_from_env_value(key: &'static str, value: Option<String>) -> ConfigResult<bool> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_applies_defaults() {
        let cfg = BoardConfig::from_lookup(lookup_from(&[(
            ENV_FEED_URL,
            "https://sched.example.org/api/cathlist",
        )]))
        .expect("config should resolve");

        assert_eq!(
            cfg.feed().base_url().as_str(),
            "https://sched.example.org/api/cathlist"
        );
        assert_eq!(
            cfg.feed().timeout(),
            Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS)
        );
        assert!(!cfg.feed().accept_invalid_certs());
        assert_eq!(cfg.feed().status_code(), None);
        assert_eq!(cfg.database_path(), Path::new(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn from_lookup_reads_every_setting() {
        let cfg = BoardConfig::from_lookup(lookup_from(&[
            (ENV_FEED_URL, " http://10.0.0.5/cathlist "),
            (ENV_FEED_TIMEOUT_SECS, "5"),
            (ENV_FEED_ACCEPT_INVALID_CERTS, "TRUE"),
            (ENV_FEED_STATUS_CODE, "1"),
            (ENV_DATABASE_PATH, "/var/lib/iclboard/iclms.sqlite"),
        ]))
        .expect("config should resolve");

        assert_eq!(cfg.feed().timeout(), Duration::from_secs(5));
        assert!(cfg.feed().accept_invalid_certs());
        assert_eq!(cfg.feed().status_code(), Some("1"));
        assert_eq!(
            cfg.database_path(),
            Path::new("/var/lib/iclboard/iclms.sqlite")
        );
    }

    #[test]
    fn missing_feed_url_is_rejected() {
        let err = BoardConfig::from_lookup(lookup_from(&[(ENV_FEED_URL, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFeedUrl(ENV_FEED_URL)));
    }

    #[test]
    fn non_http_feed_url_is_rejected() {
        let err = FeedConfig::new("ftp://sched.example.org/list").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFeedUrl { .. }));

        let err = FeedConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFeedUrl { .. }));
    }

    #[test]
    fn timeout_must_be_positive_integer() {
        assert!(matches!(
            timeout_from_env_value(Some("0".into())),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            timeout_from_env_value(Some("ten".into())),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert_eq!(
            timeout_from_env_value(Some("12".into())).unwrap(),
            Duration::from_secs(12)
        );
    }

    #[test]
    fn flag_parsing_rejects_unknown_values() {
        assert!(flag_from_env_value("K", Some("yes".into())).unwrap());
        assert!(!flag_from_env_value("K", Some("off".into())).unwrap());
        assert!(!flag_from_env_value("K", None).unwrap());
        assert!(matches!(
            flag_from_env_value("K", Some("maybe".into())),
            Err(ConfigError::InvalidFlag { key: "K", .. })
        ));
    }

    #[test]
    fn blank_status_code_clears_constraint() {
        let feed = FeedConfig::new("http://localhost/cathlist")
            .unwrap()
            .with_status_code(Some("  ".into()));
        assert_eq!(feed.status_code(), None);
    }
}
