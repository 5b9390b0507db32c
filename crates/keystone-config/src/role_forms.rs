//! Role form session configuration.
//!
//! - `ROLE_FORM_SESSION_TTL_SECS`: seconds a role form may sit untouched
//!   before it is discarded (default: `1800`)

use std::time::Duration;

const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleFormConfig {
    /// Idle time after which an open form is evicted.
    pub session_ttl: Duration,
}

impl Default for RoleFormConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

impl RoleFormConfig {
    /// Creates a new `RoleFormConfig` from environment variables.
    ///
    /// Zero or unparsable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_ttl_secs(std::env::var("ROLE_FORM_SESSION_TTL_SECS").ok().as_deref())
    }

    fn from_ttl_secs(raw: Option<&str>) -> Self {
        raw.and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(|secs| Self {
                session_ttl: Duration::from_secs(secs),
            })
            .unwrap_or_default()
    }

    pub fn with_session_ttl(session_ttl: Duration) -> Self {
        Self { session_ttl }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl() {
        assert_eq!(
            RoleFormConfig::default().session_ttl,
            Duration::from_secs(1800)
        );
    }

    #[test]
    fn test_ttl_parsing() {
        assert_eq!(
            RoleFormConfig::from_ttl_secs(Some("600")).session_ttl,
            Duration::from_secs(600)
        );
        assert_eq!(RoleFormConfig::from_ttl_secs(Some("0")), RoleFormConfig::default());
        assert_eq!(RoleFormConfig::from_ttl_secs(Some("soon")), RoleFormConfig::default());
        assert_eq!(RoleFormConfig::from_ttl_secs(None), RoleFormConfig::default());
    }
}
