// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SweepError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// API hard limits on maxResults for the two listing endpoints.
const MAX_PLAYLIST_PAGE_SIZE: u32 = 50;
const MAX_COMMENT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub filter: FilterConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub playlist_page_size: u32,
    pub comment_page_size: u32,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub token_url: String,
    pub device_code_url: String,
    pub scope: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
}

// the credential fields stay out of Debug output, matching AccessToken
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_url", &self.token_url)
            .field("device_code_url", &self.device_code_url)
            .field("scope", &self.scope)
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("access_token", &redacted(&self.access_token))
            .finish()
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "Some(<redacted>)",
        None => "None",
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    pub wordlist_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    pub dry_run: bool,
    pub max_videos: Option<usize>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SPAMSWEEP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SweepError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SweepError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://www.googleapis.com/youtube/v3".to_string(),
                playlist_page_size: 50,
                comment_page_size: 100,
            },
            auth: AuthConfig {
                token_url: "https://oauth2.googleapis.com/token".to_string(),
                device_code_url: "https://oauth2.googleapis.com/device/code".to_string(),
                scope: "https://www.googleapis.com/auth/youtube.force-ssl".to_string(),
                client_id: None,
                client_secret: None,
                refresh_token: None,
                access_token: None,
            },
            filter: FilterConfig {
                wordlist_path: PathBuf::from("config/blocked_words.json"),
            },
            scan: ScanConfig {
                dry_run: false,
                max_videos: None,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api.playlist_page_size == 0 || self.api.playlist_page_size > MAX_PLAYLIST_PAGE_SIZE
        {
            return Err(SweepError::Config(format!(
                "playlist_page_size must be between 1 and {}",
                MAX_PLAYLIST_PAGE_SIZE
            )));
        }

        if self.api.comment_page_size == 0 || self.api.comment_page_size > MAX_COMMENT_PAGE_SIZE {
            return Err(SweepError::Config(format!(
                "comment_page_size must be between 1 and {}",
                MAX_COMMENT_PAGE_SIZE
            )));
        }

        for url in [
            &self.api.base_url,
            &self.auth.token_url,
            &self.auth.device_code_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SweepError::Config(format!("Invalid URL: {}", url)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.playlist_page_size, 50);
        assert_eq!(config.api.comment_page_size, 100);
        assert!(config.auth.access_token.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default_config();
        config.api.playlist_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_page_size_rejected() {
        let mut config = Config::default_config();
        config.api.comment_page_size = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default_config();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auth_config_debug_redacts_secrets() {
        let mut config = Config::default_config();
        config.auth.client_id = Some("public-client-id".to_string());
        config.auth.client_secret = Some("secret-value".to_string());
        config.auth.refresh_token = Some("refresh-value".to_string());
        config.auth.access_token = Some("token-value".to_string());

        let rendered = format!("{:?}", config.auth);
        assert!(rendered.contains("public-client-id"));
        assert!(!rendered.contains("secret-value"));
        assert!(!rendered.contains("refresh-value"));
        assert!(!rendered.contains("token-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.toml");
        fs::write(
            &path,
            r#"
[api]
base_url = "https://api.example.com/v3"
playlist_page_size = 25
comment_page_size = 50

[auth]
token_url = "https://auth.example.com/token"
device_code_url = "https://auth.example.com/device"
scope = "test-scope"
access_token = "abc123"

[filter]
wordlist_path = "words.json"

[scan]
dry_run = true
max_videos = 5
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/v3");
        assert_eq!(config.api.playlist_page_size, 25);
        assert_eq!(config.auth.access_token.as_deref(), Some("abc123"));
        assert!(config.scan.dry_run);
        assert_eq!(config.scan.max_videos, Some(5));
    }

    #[test]
    fn test_load_rejects_invalid_page_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(
            &path,
            r#"
[api]
base_url = "https://api.example.com/v3"
playlist_page_size = 500
comment_page_size = 100

[auth]
token_url = "https://auth.example.com/token"
device_code_url = "https://auth.example.com/device"
scope = "test-scope"

[filter]
wordlist_path = "words.json"

[scan]
dry_run = false
"#,
        )
        .unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
