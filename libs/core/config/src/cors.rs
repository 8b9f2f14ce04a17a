use crate::{ConfigError, FromEnv};

/// Origins allowed when `CORS_ALLOWED_ORIGIN` is not set (local frontend dev server)
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Cross-origin configuration for browser clients
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    fn parse(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGINS)
    }
}

impl FromEnv for CorsConfig {
    /// Reads comma-separated origins from CORS_ALLOWED_ORIGIN.
    /// Falls back to the local dev origins when unset; set-but-empty is an error.
    fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) => {
                let allowed_origins = Self::parse(&raw);
                if allowed_origins.is_empty() {
                    return Err(ConfigError::ParseError {
                        key: "CORS_ALLOWED_ORIGIN".to_string(),
                        details: "no origins listed".to_string(),
                    });
                }
                Ok(Self { allowed_origins })
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
