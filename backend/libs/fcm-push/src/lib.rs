//! FCM Push Library
//!
//! Client for the Firebase Cloud Messaging legacy HTTP API.
//!
//! It handles:
//! - Building downstream messages for a device, a set of devices, or a
//!   condition over up to three topics
//! - Validating recipient limits and condition patterns before anything is sent
//! - Server-key authenticated delivery with an overridable (proxy) endpoint
//! - Topic subscription management through the Instance ID batch endpoints
//!
//! ```no_run
//! use fcm_push::{Device, FcmClient, FcmConfig, Message, Notification};
//!
//! # async fn run() -> Result<(), fcm_push::FcmError> {
//! let client = FcmClient::new(FcmConfig::new("server-key"))?;
//!
//! let mut message = Message::new();
//! message
//!     .set_notification(Notification::new("Hello", "World"))
//!     .add_recipient(Device::new("registration-token"))?;
//!
//! let response = client.send(&message).await?;
//! println!("FCM answered {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod message;
pub mod models;
pub mod notification;
pub mod recipient;
pub mod transport;

pub use client::{FcmClient, RegistrationTokens};
pub use config::{
    FcmConfig, DEFAULT_API_URL, DEFAULT_TOPIC_ADD_SUBSCRIPTION_API_URL,
    DEFAULT_TOPIC_REMOVE_SUBSCRIPTION_API_URL,
};
pub use errors::{BoxError, FcmError};
pub use message::{Message, Priority, MAX_DEVICES, MAX_TOPICS};
pub use models::{MessagePayload, TopicSubscriptionRequest};
pub use notification::Notification;
pub use recipient::{Device, Recipient, RecipientKind, Topic};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
