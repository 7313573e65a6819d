use crate::error::TubesumError;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Hugging Face hosted inference root
pub const DEFAULT_UPSTREAM_ROOT_URL: &str = "https://api-inference.huggingface.co/models";

/// Upper bound shared with request validation
pub const MAX_MIN_LENGTH: i64 = 1000;

/// Tubesum application configuration
///
/// Layered: built-in defaults, then an optional `tubesum.toml`, then the
/// process environment (`API_KEY`, `SERVER_PORT`, ...).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bearer token for the upstream inference API
    pub api_key: String,

    /// Inference API root; requests go to `<root>/<model>`
    pub upstream_api_root_url: String,

    /// Optional upstream request timeout in seconds (none by default)
    pub upstream_timeout_secs: Option<u64>,

    /// Fallback `min_length` when a request does not supply one
    pub default_min_length: i64,

    /// YouTube web root used by the transcript provider
    pub youtube_base_url: String,

    /// Comma separated caption language preference
    pub transcript_languages: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log level
    pub log_level: String,

    /// Log directory (console only when unset)
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            upstream_api_root_url: DEFAULT_UPSTREAM_ROOT_URL.to_string(),
            upstream_timeout_secs: None,
            default_min_length: 30,
            youtube_base_url: "https://www.youtube.com".to_string(),
            transcript_languages: "en".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// Keep the bearer token out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("upstream_api_root_url", &self.upstream_api_root_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("default_min_length", &self.default_min_length)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("transcript_languages", &self.transcript_languages)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `tubesum.toml` and environment variables
    ///
    /// A `.env` file, if wanted, must already be loaded into the environment.
    pub fn load() -> Result<Self, TubesumError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("tubesum").required(false))
            .add_source(config::Environment::default())
            .build()
            .map_err(|e| TubesumError::config(format!("Failed to read configuration: {}", e)))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| TubesumError::config(format!("Invalid configuration: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Caption languages in preference order
    pub fn languages(&self) -> Vec<String> {
        self.transcript_languages
            .split(',')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TubesumError> {
        if self.api_key.trim().is_empty() {
            return Err(TubesumError::config(
                "upstream API_KEY not set in environment variables",
            ));
        }

        for (name, url) in [
            ("upstream API root URL", &self.upstream_api_root_url),
            ("YouTube base URL", &self.youtube_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TubesumError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if !(1..=MAX_MIN_LENGTH).contains(&self.default_min_length) {
            return Err(TubesumError::config(format!(
                "Default min_length must be between 1 and {}",
                MAX_MIN_LENGTH
            )));
        }

        if self.languages().is_empty() {
            return Err(TubesumError::config("At least one transcript language is required"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(TubesumError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            api_key: "hf_test".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.default_min_length, 30);
        assert_eq!(config.upstream_api_root_url, DEFAULT_UPSTREAM_ROOT_URL);
        assert!(config.upstream_timeout_secs.is_none());
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = AppConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn test_validate() {
        assert!(valid_config().validate().is_ok());

        let mut invalid = valid_config();
        invalid.upstream_api_root_url = "ftp://example.com".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = valid_config();
        invalid.default_min_length = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = valid_config();
        invalid.default_min_length = 1001;
        assert!(invalid.validate().is_err());

        let mut invalid = valid_config();
        invalid.transcript_languages = " , ".to_string();
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_languages() {
        let mut config = valid_config();
        config.transcript_languages = "en, de ,,fr".to_string();
        assert_eq!(config.languages(), vec!["en", "de", "fr"]);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("hf_test"));
        assert!(rendered.contains("<redacted>"));
    }
}
