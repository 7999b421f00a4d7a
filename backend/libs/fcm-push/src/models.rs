use serde::Serialize;
use serde_json::{Map, Value};

use crate::message::Priority;
use crate::notification::Notification;

/// Legacy HTTP send request body
///
/// Exactly one of `to`, `registration_ids` and `condition` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Instance ID batchAdd / batchRemove request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSubscriptionRequest {
    pub to: String,
    pub registration_tokens: Vec<String>,
}
