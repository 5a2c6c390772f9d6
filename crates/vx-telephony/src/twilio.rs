//! Twilio REST API client

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, TelephonyError};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Twilio API client
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

/// Call resource returned by the origination endpoint
#[derive(Debug, Deserialize)]
struct CallResource {
    sid: String,
}

impl TwilioClient {
    /// Create a new Twilio client
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (stub endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Originate an outbound call
    ///
    /// Asks the provider to call `to` from `from` and drive the call through
    /// the webhook at `voice_url`. Returns the provider-assigned call SID.
    pub async fn originate_call(&self, from: &str, to: &str, voice_url: &str) -> Result<String> {
        if to.is_empty() {
            return Err(TelephonyError::Config(
                "destination number not configured".to_string(),
            ));
        }
        if from.is_empty() {
            return Err(TelephonyError::Config(
                "caller number not configured".to_string(),
            ));
        }

        info!("Originating call to {}", to);

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.account_sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to),
                ("From", from),
                ("Url", voice_url),
                ("Method", "POST"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(TelephonyError::Api(format!(
                "Failed to originate call: {} - {}",
                status, text
            )));
        }

        let call: CallResource = response
            .json()
            .await
            .map_err(|e| TelephonyError::Api(format!("Malformed call resource: {}", e)))?;

        info!("Outbound call started: {}", call.sid);
        Ok(call.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = TwilioClient::new("AC123", "token123");
        assert_eq!(client.account_sid, "AC123");
        assert_eq!(client.base_url, "https://api.twilio.com");
    }

    #[tokio::test]
    async fn test_originate_call_returns_sid() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
            .and(body_string_contains("To=%2B15550002222"))
            .and(body_string_contains("From=%2B15550001111"))
            .and(body_string_contains("Url=https%3A%2F%2Fexample.ngrok.io%2Fvoice"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "CA0123456789abcdef",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        let client = TwilioClient::new("AC123", "token").with_base_url(server.uri());
        let sid = client
            .originate_call("+15550001111", "+15550002222", "https://example.ngrok.io/voice")
            .await
            .unwrap();

        assert_eq!(sid, "CA0123456789abcdef");
    }

    #[tokio::test]
    async fn test_originate_call_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid number"))
            .mount(&server)
            .await;

        let client = TwilioClient::new("AC123", "token").with_base_url(server.uri());
        let err = client
            .originate_call("+15550001111", "+15550002222", "https://example.ngrok.io/voice")
            .await
            .unwrap_err();

        match err {
            TelephonyError::Api(msg) => assert!(msg.contains("invalid number")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_destination_is_config_error() {
        let client = TwilioClient::new("AC123", "token");
        let err = client
            .originate_call("+15550001111", "", "https://example.ngrok.io/voice")
            .await
            .unwrap_err();

        assert!(matches!(err, TelephonyError::Config(_)));
    }
}
