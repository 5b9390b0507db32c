use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_origins(DEFAULT_ALLOWED_ORIGINS)
    }
}

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        Self::from_origins(&raw)
    }

    /// Parses a comma separated origin list, skipping blanks.
    pub fn from_origins(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_origins_trims_and_skips_blanks() {
        let config = CorsConfig::from_origins(" https://admin.example.com , ,http://localhost:5173");
        assert_eq!(
            config.allowed_origins,
            vec!["https://admin.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_default_origins() {
        assert_eq!(CorsConfig::default().allowed_origins.len(), 2);
    }
}
