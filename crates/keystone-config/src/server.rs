//! HTTP listen address configuration.
//!
//! - `HOST`: Interface to bind (default: `0.0.0.0`)
//! - `PORT`: Port to bind (default: `3000`)

/// Address the API server listens on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Creates a new `ServerConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_custom_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
