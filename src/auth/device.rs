// file: src/auth/device.rs
// description: OAuth 2.0 device authorization flow for interactive token acquisition
// reference: https://developers.google.com/identity/protocols/oauth2/limited-input-device

use crate::auth::{AccessToken, TokenErrorResponse, TokenResponse};
use crate::config::AuthConfig;
use crate::error::{Result, SweepError};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceCodeResponse {
    pub device_code: String,
    pub user_code: String,
    // Google sends verification_url; the RFC 8628 field name is verification_uri
    #[serde(alias = "verification_uri")]
    pub verification_url: String,
    pub expires_in: u64,
    #[serde(default = "default_poll_interval")]
    pub interval: u64,
}

fn default_poll_interval() -> u64 {
    5
}

pub(crate) enum PollOutcome {
    Token(AccessToken),
    Pending,
    SlowDown,
}

pub struct DeviceFlow<'a> {
    client: &'a reqwest::Client,
    config: &'a AuthConfig,
}

impl<'a> DeviceFlow<'a> {
    pub(crate) fn new(client: &'a reqwest::Client, config: &'a AuthConfig) -> Self {
        Self { client, config }
    }

    pub async fn run(&self) -> Result<AccessToken> {
        let client_id = self.config.client_id.as_deref().ok_or_else(|| {
            SweepError::Auth("interactive mode requires client_id in the configuration".to_string())
        })?;

        let grant = self.request_device_code(client_id).await?;

        println!(
            "To authorize this scan, open {} and enter the code: {}",
            grant.verification_url, grant.user_code
        );

        self.poll_for_token(client_id, &grant).await
    }

    async fn request_device_code(&self, client_id: &str) -> Result<DeviceCodeResponse> {
        let params = [("client_id", client_id), ("scope", &self.config.scope)];

        let response = self
            .client
            .post(&self.config.device_code_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SweepError::Auth(format!(
                "device code request failed with status {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn poll_for_token(
        &self,
        client_id: &str,
        grant: &DeviceCodeResponse,
    ) -> Result<AccessToken> {
        let deadline = Instant::now() + Duration::from_secs(grant.expires_in);
        let mut interval = grant.interval;

        loop {
            tokio::time::sleep(Duration::from_secs(interval)).await;

            if Instant::now() >= deadline {
                return Err(SweepError::Auth(
                    "device authorization expired before approval".to_string(),
                ));
            }

            let mut params = vec![
                ("client_id", client_id.to_string()),
                ("device_code", grant.device_code.clone()),
                (
                    "grant_type",
                    "urn:ietf:params:oauth:grant-type:device_code".to_string(),
                ),
            ];
            if let Some(secret) = &self.config.client_secret {
                params.push(("client_secret", secret.clone()));
            }

            let response = self
                .client
                .post(&self.config.token_url)
                .form(&params)
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;

            match classify_poll_response(status, &body)? {
                PollOutcome::Token(token) => return Ok(token),
                PollOutcome::Pending => {
                    debug!("Authorization pending, polling again in {}s", interval);
                }
                PollOutcome::SlowDown => {
                    interval += 5;
                    debug!("Server asked to slow down, polling every {}s", interval);
                }
            }
        }
    }
}

pub(crate) fn classify_poll_response(status: u16, body: &str) -> Result<PollOutcome> {
    if (200..300).contains(&status) {
        let token: TokenResponse = serde_json::from_str(body)?;
        return Ok(PollOutcome::Token(AccessToken::new(token.access_token)));
    }

    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) => match err.error.as_str() {
            "authorization_pending" => Ok(PollOutcome::Pending),
            "slow_down" => Ok(PollOutcome::SlowDown),
            "access_denied" => Err(SweepError::Auth(
                "the user denied the authorization request".to_string(),
            )),
            "expired_token" => Err(SweepError::Auth(
                "device authorization expired before approval".to_string(),
            )),
            other => Err(SweepError::Auth(match err.error_description {
                Some(description) => format!("{} ({})", other, description),
                None => other.to_string(),
            })),
        },
        Err(_) => Err(SweepError::Auth(format!(
            "token endpoint returned status {}: {}",
            status,
            body.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenMode, TokenProvider};
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_device_code_response_accepts_rfc_field_name() {
        let body = r#"{
            "device_code": "dc",
            "user_code": "ABCD-EFGH",
            "verification_uri": "https://example.com/device",
            "expires_in": 1800
        }"#;

        let parsed: DeviceCodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.verification_url, "https://example.com/device");
        assert_eq!(parsed.interval, 5);
    }

    #[test]
    fn test_poll_pending_and_slow_down_keep_polling() {
        let pending = classify_poll_response(428, r#"{"error":"authorization_pending"}"#).unwrap();
        assert!(matches!(pending, PollOutcome::Pending));

        let slow = classify_poll_response(403, r#"{"error":"slow_down"}"#).unwrap();
        assert!(matches!(slow, PollOutcome::SlowDown));
    }

    #[test]
    fn test_poll_denial_is_terminal() {
        let denied = classify_poll_response(403, r#"{"error":"access_denied"}"#);
        assert!(matches!(denied, Err(SweepError::Auth(_))));

        let expired = classify_poll_response(400, r#"{"error":"expired_token"}"#);
        assert!(matches!(expired, Err(SweepError::Auth(_))));
    }

    #[test]
    fn test_poll_success_yields_token() {
        let outcome = classify_poll_response(200, r#"{"access_token":"tok"}"#).unwrap();
        match outcome {
            PollOutcome::Token(token) => assert_eq!(token.as_str(), "tok"),
            _ => panic!("expected a token"),
        }
    }

    #[test]
    fn test_poll_unparseable_error_is_hard_failure() {
        let result = classify_poll_response(500, "<html>Internal Server Error</html>");
        assert!(matches!(result, Err(SweepError::Auth(_))));
    }

    #[tokio::test]
    async fn test_interactive_flow_polls_until_approved() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/device/code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "device_code": "dc-1",
                "user_code": "ABCD-EFGH",
                "verification_url": "https://example.com/device",
                "expires_in": 1800,
                "interval": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        // first poll is still pending, the second succeeds
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("device_code=dc-1"))
            .respond_with(ResponseTemplate::new(428).set_body_json(json!({
                "error": "authorization_pending"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("device_code=dc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "approved-token",
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let mut config = Config::default_config().auth;
        config.device_code_url = format!("{}/device/code", server.uri());
        config.token_url = format!("{}/token", server.uri());
        config.client_id = Some("id".to_string());

        let provider = TokenProvider::new(config);
        let token = provider.acquire(TokenMode::Interactive).await.unwrap();
        assert_eq!(token.as_str(), "approved-token");
    }
}
