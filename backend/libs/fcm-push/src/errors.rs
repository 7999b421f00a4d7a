use thiserror::Error;

use crate::recipient::RecipientKind;

/// Boxed error returned by an [`HttpTransport`](crate::transport::HttpTransport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// FCM Client Error Types
#[derive(Error, Debug)]
pub enum FcmError {
    #[error("FCM client configuration error: {0}")]
    Configuration(String),

    #[error("Mixed recipient types are not supported by FCM: expected {expected}, got {found}")]
    TypeMismatch {
        expected: RecipientKind,
        found: RecipientKind,
    },

    #[error("Message must have at least one recipient")]
    EmptyRecipients,

    #[error("Message topic limit exceeded: {count} topics, FCM supports a maximum of {max}")]
    TopicLimitExceeded { count: usize, max: usize },

    #[error("Message device limit exceeded: {count} devices, FCM supports a maximum of {max}")]
    DeviceLimitExceeded { count: usize, max: usize },

    #[error("Missing message condition: a condition pattern is required when sending to combinations of topics")]
    MissingCondition,

    #[error("Condition pattern has {placeholders} \"%s\" placeholders but the message has {topics} topics")]
    ConditionMismatch { placeholders: usize, topics: usize },

    #[error("Failed to encode FCM payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("FCM request failed: {0}")]
    Transport(#[source] BoxError),
}

impl FcmError {
    /// True for failures raised while validating a message payload.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FcmError::TypeMismatch { .. }
                | FcmError::EmptyRecipients
                | FcmError::TopicLimitExceeded { .. }
                | FcmError::DeviceLimitExceeded { .. }
                | FcmError::MissingCondition
                | FcmError::ConditionMismatch { .. }
        )
    }
}
