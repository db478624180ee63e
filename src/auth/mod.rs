// file: src/auth/mod.rs
// description: OAuth2 token acquisition with explicit interactive/silent modes
// reference: https://developers.google.com/identity/protocols/oauth2

mod device;

pub use device::DeviceFlow;

use crate::config::AuthConfig;
use crate::error::{Result, SweepError};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// How a token may be obtained. Interactive mode walks the user through the
/// device authorization flow; silent mode only uses credentials already in
/// the configuration and never prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    Interactive,
    Silent,
}

/// Bearer credential for one pipeline run. The secret is kept out of Debug
/// output so it cannot leak through logs.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

pub struct TokenProvider {
    client: reqwest::Client,
    config: AuthConfig,
}

impl TokenProvider {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Acquire a bearer token. Each call performs the full documented steps
    /// for the requested mode; nothing is cached between calls.
    pub async fn acquire(&self, mode: TokenMode) -> Result<AccessToken> {
        match mode {
            TokenMode::Silent => self.acquire_silent().await,
            TokenMode::Interactive => DeviceFlow::new(&self.client, &self.config).run().await,
        }
    }

    async fn acquire_silent(&self) -> Result<AccessToken> {
        if let Some(token) = &self.config.access_token {
            debug!("Using access token from configuration");
            return Ok(AccessToken::new(token.clone()));
        }

        if self.config.refresh_token.is_some() {
            debug!("Exchanging refresh token for an access token");
            return self.refresh_grant().await;
        }

        Err(SweepError::Auth(
            "silent mode requires an access_token or refresh_token in the configuration"
                .to_string(),
        ))
    }

    async fn refresh_grant(&self) -> Result<AccessToken> {
        let client_id = require_credential("client_id", &self.config.client_id)?;
        let client_secret = require_credential("client_secret", &self.config.client_secret)?;
        let refresh_token = require_credential("refresh_token", &self.config.refresh_token)?;

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        parse_token_response(response).await
    }
}

fn require_credential<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| SweepError::Auth(format!("{} is not configured", name)))
}

pub(crate) async fn parse_token_response(response: reqwest::Response) -> Result<AccessToken> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        let token: TokenResponse = serde_json::from_str(&body)?;
        return Ok(AccessToken::new(token.access_token));
    }

    Err(SweepError::Auth(describe_token_error(
        status.as_u16(),
        &body,
    )))
}

fn describe_token_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) => match err.error_description {
            Some(description) => format!("{} ({})", err.error, description),
            None => err.error,
        },
        Err(_) => format!("token endpoint returned status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth_config() -> AuthConfig {
        Config::default_config().auth
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "AccessToken(<redacted>)");
    }

    #[tokio::test]
    async fn test_silent_mode_uses_configured_token() {
        let mut config = auth_config();
        config.access_token = Some("configured-token".to_string());

        let provider = TokenProvider::new(config);
        let token = provider.acquire(TokenMode::Silent).await.unwrap();
        assert_eq!(token.as_str(), "configured-token");
    }

    #[tokio::test]
    async fn test_silent_mode_without_credentials_fails() {
        let provider = TokenProvider::new(auth_config());
        let result = provider.acquire(TokenMode::Silent).await;
        assert!(matches!(result, Err(SweepError::Auth(_))));
    }

    #[tokio::test]
    async fn test_refresh_grant_exchanges_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = auth_config();
        config.token_url = format!("{}/token", server.uri());
        config.client_id = Some("id".to_string());
        config.client_secret = Some("secret".to_string());
        config.refresh_token = Some("refresh".to_string());

        let provider = TokenProvider::new(config);
        let token = provider.acquire(TokenMode::Silent).await.unwrap();
        assert_eq!(token.as_str(), "fresh-token");
    }

    #[tokio::test]
    async fn test_refresh_grant_surfaces_error_description() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Token has been revoked."
            })))
            .mount(&server)
            .await;

        let mut config = auth_config();
        config.token_url = format!("{}/token", server.uri());
        config.client_id = Some("id".to_string());
        config.client_secret = Some("secret".to_string());
        config.refresh_token = Some("refresh".to_string());

        let provider = TokenProvider::new(config);
        let err = provider.acquire(TokenMode::Silent).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid_grant"));
        assert!(message.contains("Token has been revoked."));
    }

    #[tokio::test]
    async fn test_refresh_grant_without_client_secret_fails() {
        let mut config = auth_config();
        config.client_id = Some("id".to_string());
        config.refresh_token = Some("refresh".to_string());

        let provider = TokenProvider::new(config);
        let err = provider.acquire(TokenMode::Silent).await.unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }
}
