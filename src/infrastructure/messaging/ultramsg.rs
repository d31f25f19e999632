use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    application::services::messenger::{GatewayReceipt, WhatsAppGateway},
    domain::value_objects::{Location, PhoneNumber},
};

pub const DEFAULT_BASE_URL: &str = "https://api.ultramsg.com";

#[derive(Debug, Clone)]
pub struct UltraMsgConfig {
    pub base_url: String,
    pub instance_id: String,
    pub token: String,
}

/// WhatsApp gateway backed by the UltraMsg HTTP API.
pub struct UltraMsgClient {
    http: Client,
    config: UltraMsgConfig,
}

impl UltraMsgClient {
    pub fn new(config: UltraMsgConfig) -> anyhow::Result<Self> {
        if config.instance_id.trim().is_empty() || config.token.trim().is_empty() {
            anyhow::bail!("ultramsg instance id and token are required");
        }

        let http = Client::builder()
            .user_agent(concat!("whatsapp-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build ultramsg http client")?;

        Ok(Self { http, config })
    }

    fn build_url(&self, method: &str) -> String {
        format!(
            "{}/{}/messages/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.instance_id,
            method
        )
    }

    async fn post(&self, method: &str, params: &[(&str, &str)]) -> anyhow::Result<GatewayReceipt> {
        let mut form = Vec::with_capacity(params.len() + 1);
        form.push(("token", self.config.token.as_str()));
        form.extend_from_slice(params);

        let response = self
            .http
            .post(self.build_url(method))
            .form(&form)
            .send()
            .await
            .with_context(|| format!("ultramsg {method} request failed"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("ultramsg {method} response unreadable"))?;

        if !status.is_success() {
            anyhow::bail!("ultramsg {method} returned {status}: {text}");
        }

        let payload: UltraMsgResponse = serde_json::from_str(&text)
            .with_context(|| format!("ultramsg {method} returned malformed body: {text}"))?;
        payload.into_receipt(method)
    }
}

#[async_trait]
impl WhatsAppGateway for UltraMsgClient {
    async fn send_chat_message(
        &self,
        phone: &PhoneNumber,
        body: &str,
    ) -> anyhow::Result<GatewayReceipt> {
        self.post("chat", &[("to", phone.as_str()), ("body", body)])
            .await
    }

    async fn send_location(
        &self,
        phone: &PhoneNumber,
        location: &Location,
    ) -> anyhow::Result<GatewayReceipt> {
        let lat = location.latitude.to_string();
        let lng = location.longitude.to_string();
        self.post(
            "location",
            &[
                ("to", phone.as_str()),
                ("address", location.address.as_str()),
                ("lat", lat.as_str()),
                ("lng", lng.as_str()),
            ],
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct UltraMsgResponse {
    sent: Option<Value>,
    message: Option<String>,
    id: Option<Value>,
    error: Option<Value>,
}

impl UltraMsgResponse {
    fn into_receipt(self, method: &str) -> anyhow::Result<GatewayReceipt> {
        if let Some(error) = self.error {
            anyhow::bail!("ultramsg {method} error: {}", describe(&error));
        }

        let sent = matches!(&self.sent, Some(Value::Bool(true)))
            || matches!(&self.sent, Some(Value::String(s)) if s == "true");
        if !sent {
            anyhow::bail!(
                "ultramsg {method} not sent: {}",
                self.message.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        Ok(GatewayReceipt {
            id: self.id.as_ref().map(describe),
        })
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, method, path},
    };

    use super::*;

    async fn client(server: &MockServer) -> UltraMsgClient {
        UltraMsgClient::new(UltraMsgConfig {
            base_url: server.uri(),
            instance_id: "instance42".into(),
            token: "secret".into(),
        })
        .unwrap()
    }

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("15551234567").unwrap()
    }

    #[test]
    fn requires_credentials() {
        let config = UltraMsgConfig {
            base_url: DEFAULT_BASE_URL.into(),
            instance_id: "".into(),
            token: "secret".into(),
        };
        assert!(UltraMsgClient::new(config).is_err());
    }

    #[tokio::test]
    async fn sends_chat_message_as_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/instance42/messages/chat"))
            .and(body_string_contains("token=secret"))
            .and(body_string_contains("to=15551234567"))
            .and(body_string_contains("body=hello%0A%0Ahttps"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"sent": "true", "message": "ok", "id": 7})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client(&server)
            .await
            .send_chat_message(&phone(), "hello\n\nhttps://cdn.example/v.mp4")
            .await
            .unwrap();

        assert_eq!(receipt.id.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn sends_location_with_numeric_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/instance42/messages/location"))
            .and(body_string_contains("address=Shared+Location"))
            .and(body_string_contains("lat=12.34"))
            .and(body_string_contains("lng=56.78"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sent": "true", "id": "9"})))
            .expect(1)
            .mount(&server)
            .await;

        let location = Location::parse("12.34", "56.78", None).unwrap();
        let receipt = client(&server)
            .await
            .send_location(&phone(), &location)
            .await
            .unwrap();

        assert_eq!(receipt.id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn error_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": [{"to": "invalid number"}]})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .send_chat_message(&phone(), "hi")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("invalid number"));
    }

    #[tokio::test]
    async fn unsent_and_http_errors_are_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/instance42/messages/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sent": "false", "message": "queue full"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/instance42/messages/location"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client(&server).await;
        assert!(client.send_chat_message(&phone(), "hi").await.is_err());
        let location = Location::parse("1", "2", None).unwrap();
        assert!(client.send_location(&phone(), &location).await.is_err());
    }
}
