use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend, without a trailing slash
    pub server_url: String,
    /// Prepended to every resource path
    pub prefix: String,
    pub timeout_ms: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding session.json; None keeps the session in memory
    pub dir: Option<PathBuf>,
}

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Origin joined with the prefix, e.g. `http://localhost:8080/api`
    pub fn base_url(&self) -> String {
        let origin = self.server_url.trim_end_matches('/');
        let prefix = self.prefix.trim_end_matches('/');
        if prefix.is_empty() {
            origin.to_string()
        } else if prefix.starts_with('/') {
            format!("{}{}", origin, prefix)
        } else {
            format!("{}/{}", origin, prefix)
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("HRADMIN_SERVER_URL") {
            self.api.server_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("HRADMIN_API_PREFIX") {
            self.api.prefix = v;
        }
        if let Ok(v) = env::var("HRADMIN_TIMEOUT_MS") {
            self.api.timeout_ms = v.parse().unwrap_or(self.api.timeout_ms);
        }
        if let Ok(v) = env::var("HRADMIN_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("HRADMIN_SESSION_DIR") {
            self.session.dir = if v.is_empty() { None } else { Some(PathBuf::from(v)) };
        }

        self
    }

    /// Config pointing at an explicit server, everything else at development defaults
    pub fn for_server(server_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.server_url = server_url.into().trim_end_matches('/').to_string();
        config.session.dir = None;
        config
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                server_url: "http://localhost:8080".to_string(),
                prefix: DEFAULT_API_PREFIX.to_string(),
                timeout_ms: DEFAULT_TIMEOUT_MS,
                enable_request_logging: true,
            },
            session: SessionConfig {
                dir: default_session_dir(),
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                server_url: "https://staging.example.com".to_string(),
                prefix: DEFAULT_API_PREFIX.to_string(),
                timeout_ms: DEFAULT_TIMEOUT_MS,
                enable_request_logging: true,
            },
            session: SessionConfig {
                dir: default_session_dir(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                server_url: "https://app.example.com".to_string(),
                prefix: DEFAULT_API_PREFIX.to_string(),
                timeout_ms: DEFAULT_TIMEOUT_MS,
                enable_request_logging: false,
            },
            session: SessionConfig {
                dir: default_session_dir(),
            },
        }
    }
}

fn default_session_dir() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("hradmin"))
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static ClientConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = ClientConfig::development();
        assert_eq!(config.api.prefix, "/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = ClientConfig::production();
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn test_base_url_joins_prefix() {
        let mut config = ClientConfig::for_server("http://127.0.0.1:9000/");
        assert_eq!(config.api.base_url(), "http://127.0.0.1:9000/api");

        config.api.prefix = "api/".to_string();
        assert_eq!(config.api.base_url(), "http://127.0.0.1:9000/api");

        config.api.prefix = String::new();
        assert_eq!(config.api.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_for_server_keeps_session_in_memory() {
        let config = ClientConfig::for_server("http://localhost:1");
        assert!(config.session.dir.is_none());
    }
}
