use std::env;
use std::path::{Component, Path, PathBuf};

/// Candidate files the importer tries, in order, when none are given
pub const DEFAULT_CANDIDATE_FILES: [&str; 5] = [
    "insight_search01.csv",
    "insight_search02.csv",
    "insight_search03.csv",
    "insight_search04.csv",
    "insight_search05.csv",
];

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tribit.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Static root is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("Fallback path must stay inside the static root: {0}")]
    InvalidFallback(String),
}

/// Settings for the static file responder
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub root_dir: PathBuf,
    /// URL path of the document served for unknown routes, e.g. `/index.html`
    pub fallback_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            root_dir: PathBuf::from("."),
            fallback_path: "/index.html".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .unwrap_or(defaults.port),
            root_dir: env::var("STATIC_ROOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            fallback_path: env::var("SPA_FALLBACK_PATH").unwrap_or(defaults.fallback_path),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// On-disk location of the fallback document
    pub fn fallback_file(&self) -> PathBuf {
        self.root_dir.join(self.fallback_path.trim_start_matches('/'))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root_dir.is_dir() {
            return Err(ConfigError::RootNotDirectory(self.root_dir.clone()));
        }

        let relative = Path::new(self.fallback_path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(ConfigError::InvalidFallback(self.fallback_path.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_file_joins_root() {
        let config = ServerConfig::new("/srv/site");
        assert_eq!(config.fallback_file(), PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_validate_rejects_parent_fallback() {
        let dir = std::env::temp_dir();
        let config = ServerConfig {
            fallback_path: "/../secret.html".to_string(),
            ..ServerConfig::new(dir)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFallback(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let config = ServerConfig::new("/nonexistent/static/root");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RootNotDirectory(_))
        ));
    }

    #[test]
    fn test_validate_accepts_default_fallback() {
        let config = ServerConfig::new(std::env::temp_dir());
        assert!(config.validate().is_ok());
    }
}
