use std::fmt;

/// Legacy HTTP send endpoint
pub const DEFAULT_API_URL: &str = "https://fcm.googleapis.com/fcm/send";
/// Instance ID endpoint subscribing tokens to a topic
pub const DEFAULT_TOPIC_ADD_SUBSCRIPTION_API_URL: &str = "https://iid.googleapis.com/iid/v1:batchAdd";
/// Instance ID endpoint unsubscribing tokens from a topic
pub const DEFAULT_TOPIC_REMOVE_SUBSCRIPTION_API_URL: &str =
    "https://iid.googleapis.com/iid/v1:batchRemove";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// FCM client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct FcmConfig {
    /// Server key sent as `Authorization: key=<api_key>`
    pub api_key: Option<String>,
    /// Send endpoint, replaced when going through a proxy
    pub api_url: String,
    pub topic_add_url: String,
    pub topic_remove_url: String,
    /// Timeout applied by the HTTP transport to each request
    pub request_timeout_secs: u64,
}

impl fmt::Debug for FcmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FcmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("topic_add_url", &self.topic_add_url)
            .field("topic_remove_url", &self.topic_remove_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            topic_add_url: DEFAULT_TOPIC_ADD_SUBSCRIPTION_API_URL.to_string(),
            topic_remove_url: DEFAULT_TOPIC_REMOVE_SUBSCRIPTION_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FcmConfig {
    /// Create configuration with the default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Load configuration from environment variables
    ///
    /// `FCM_API_KEY` may be absent; sending then fails until a key is set.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: std::env::var("FCM_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            api_url: std::env::var("FCM_API_URL").unwrap_or(defaults.api_url),
            topic_add_url: std::env::var("FCM_TOPIC_ADD_URL").unwrap_or(defaults.topic_add_url),
            topic_remove_url: std::env::var("FCM_TOPIC_REMOVE_URL")
                .unwrap_or(defaults.topic_remove_url),
            request_timeout_secs: std::env::var("FCM_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Route sends through a proxy. Subscription endpoints are unaffected.
    pub fn with_proxy_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// The API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}
