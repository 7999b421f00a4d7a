use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::FcmConfig;
use crate::errors::FcmError;
use crate::message::Message;
use crate::models::TopicSubscriptionRequest;
use crate::recipient::Device;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// One or more registration tokens for topic subscription calls
///
/// Built through `From`, so a single token and a list are accepted alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationTokens(Vec<String>);

impl RegistrationTokens {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<String> for RegistrationTokens {
    fn from(token: String) -> Self {
        Self(vec![token])
    }
}

impl From<&str> for RegistrationTokens {
    fn from(token: &str) -> Self {
        Self(vec![token.to_string()])
    }
}

impl From<Device> for RegistrationTokens {
    fn from(device: Device) -> Self {
        Self(vec![device.token().to_string()])
    }
}

impl From<Vec<String>> for RegistrationTokens {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<Vec<&str>> for RegistrationTokens {
    fn from(tokens: Vec<&str>) -> Self {
        Self(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for RegistrationTokens {
    fn from(tokens: &[String]) -> Self {
        Self(tokens.to_vec())
    }
}

impl From<&[&str]> for RegistrationTokens {
    fn from(tokens: &[&str]) -> Self {
        Self(tokens.iter().map(|token| token.to_string()).collect())
    }
}

impl From<Vec<Device>> for RegistrationTokens {
    fn from(devices: Vec<Device>) -> Self {
        Self(devices.iter().map(|device| device.token().to_string()).collect())
    }
}

/// Firebase Cloud Messaging legacy HTTP client
///
/// Serializes [`Message`]s and posts them with server-key authentication.
/// Responses are handed back untouched; there are no retries.
pub struct FcmClient<T = ReqwestTransport> {
    config: FcmConfig,
    transport: T,
}

impl FcmClient<ReqwestTransport> {
    /// Create a client backed by `reqwest`
    pub fn new(config: FcmConfig) -> Result<Self, FcmError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from `FCM_*` environment variables
    pub fn from_env() -> Result<Self, FcmError> {
        Self::new(FcmConfig::from_env())
    }
}

impl<T: HttpTransport> FcmClient<T> {
    pub fn with_transport(config: FcmConfig, transport: T) -> Self {
        info!(
            "Initialized FCM client for api_url={}, api_key_configured={}",
            config.api_url,
            config.api_key().is_some()
        );

        Self { config, transport }
    }

    pub fn config(&self) -> &FcmConfig {
        &self.config
    }

    /// Server key from the Firebase console
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Route sends through a proxy server of your own
    pub fn set_proxy_api_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.config.api_url = url.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Send a message and return the raw FCM response
    pub async fn send(&self, message: &Message) -> Result<HttpResponse, FcmError> {
        let api_key = self.require_api_key()?;
        let payload = message.serialize()?;

        debug!(
            url = %self.config.api_url,
            recipient_kind = ?message.recipient_kind(),
            recipients = message.recipients().len(),
            "Sending FCM message"
        );

        self.post_json(&self.config.api_url, api_key, &payload).await
    }

    /// Subscribe one or more registration tokens to a topic
    pub async fn add_topic_subscription(
        &self,
        topic_id: impl fmt::Display,
        tokens: impl Into<RegistrationTokens>,
    ) -> Result<HttpResponse, FcmError> {
        self.process_topic_subscription(topic_id, tokens.into(), &self.config.topic_add_url)
            .await
    }

    /// Unsubscribe one or more registration tokens from a topic
    pub async fn remove_topic_subscription(
        &self,
        topic_id: impl fmt::Display,
        tokens: impl Into<RegistrationTokens>,
    ) -> Result<HttpResponse, FcmError> {
        self.process_topic_subscription(topic_id, tokens.into(), &self.config.topic_remove_url)
            .await
    }

    async fn process_topic_subscription(
        &self,
        topic_id: impl fmt::Display,
        tokens: RegistrationTokens,
        url: &str,
    ) -> Result<HttpResponse, FcmError> {
        let api_key = self.require_api_key()?;
        let request = TopicSubscriptionRequest {
            to: format!("/topics/{}", topic_id),
            registration_tokens: tokens.into_inner(),
        };

        debug!(
            url = %url,
            topic = %request.to,
            tokens = request.registration_tokens.len(),
            "Updating FCM topic subscription"
        );

        self.post_json(url, api_key, &request).await
    }

    fn require_api_key(&self) -> Result<&str, FcmError> {
        self.config.api_key().ok_or_else(|| {
            FcmError::Configuration(
                "an API key must be configured before sending a push message".to_string(),
            )
        })
    }

    async fn post_json<B: Serialize>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
    ) -> Result<HttpResponse, FcmError> {
        let request = HttpRequest {
            url: url.to_string(),
            headers: vec![
                ("Authorization".to_string(), format!("key={}", api_key)),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: serde_json::to_vec(body)?,
        };

        match self.transport.post(request).await {
            Ok(response) => {
                debug!(url = %url, status = %response.status, "FCM request completed");
                Ok(response)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "FCM request failed");
                Err(FcmError::Transport(e))
            }
        }
    }
}
