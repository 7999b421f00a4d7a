use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::FcmError;
use crate::models::MessagePayload;
use crate::notification::Notification;
use crate::recipient::{Recipient, RecipientKind};

/// Maximum topics per message: https://firebase.google.com/docs/cloud-messaging/http-server-ref#send-downstream
pub const MAX_TOPICS: usize = 3;
/// Maximum devices per message
pub const MAX_DEVICES: usize = 1000;

const CONDITION_PLACEHOLDER: &str = "%s";

/// Delivery priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Downstream message
///
/// Setters never validate; all recipient and condition rules are checked by
/// [`Message::serialize`], except the recipient type, which is locked in by the
/// first [`Message::add_recipient`] call.
#[derive(Debug, Clone, Default)]
pub struct Message {
    notification: Option<Notification>,
    collapse_key: Option<String>,
    priority: Option<Priority>,
    content_available: Option<bool>,
    data: Option<Map<String, Value>>,
    recipients: Vec<Recipient>,
    recipient_kind: Option<RecipientKind>,
    time_to_live: Option<u32>,
    condition: Option<String>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipient. All recipients must be of the same kind as the
    /// first one; on mismatch the list is left untouched.
    pub fn add_recipient(
        &mut self,
        recipient: impl Into<Recipient>,
    ) -> Result<&mut Self, FcmError> {
        let recipient = recipient.into();
        let found = recipient.kind();

        match self.recipient_kind {
            Some(expected) if expected != found => {
                return Err(FcmError::TypeMismatch { expected, found });
            }
            Some(_) => {}
            None => self.recipient_kind = Some(found),
        }

        self.recipients.push(recipient);
        Ok(self)
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn recipient_kind(&self) -> Option<RecipientKind> {
        self.recipient_kind
    }

    pub fn set_notification(&mut self, notification: Notification) -> &mut Self {
        self.notification = Some(notification);
        self
    }

    /// Messages sharing a collapse key replace each other while queued
    pub fn set_collapse_key(&mut self, collapse_key: impl Into<String>) -> &mut Self {
        self.collapse_key = Some(collapse_key.into());
        self
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = Some(priority);
        self
    }

    /// Wakes an iOS app for a background sync
    pub fn set_content_available(&mut self, content_available: bool) -> &mut Self {
        self.content_available = Some(content_available);
        self
    }

    pub fn content_available(&self) -> bool {
        self.content_available.unwrap_or(false)
    }

    pub fn set_data(&mut self, data: Map<String, Value>) -> &mut Self {
        self.data = Some(data);
        self
    }

    /// Time to live in seconds. Kept on the message only; the legacy
    /// payload built by [`Message::serialize`] does not carry it.
    pub fn set_time_to_live(&mut self, seconds: u32) -> &mut Self {
        self.time_to_live = Some(seconds);
        self
    }

    pub fn time_to_live(&self) -> Option<u32> {
        self.time_to_live
    }

    /// Condition pattern used when sending to a combination of topics.
    ///
    /// Each `%s` is replaced, in recipient order, by `'<topic>' in topics`:
    /// - `"%s && %s"` targets devices subscribed to topic 1 and topic 2
    /// - `"%s && (%s || %s)"` targets topic 1 and either topic 2 or 3
    pub fn set_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        self.condition = Some(condition.into());
        self
    }

    /// Build the wire payload, validating recipients and condition.
    pub fn serialize(&self) -> Result<MessagePayload, FcmError> {
        let mut payload = MessagePayload {
            to: None,
            registration_ids: None,
            condition: None,
            collapse_key: None,
            data: None,
            priority: None,
            content_available: None,
            notification: None,
        };

        match (self.recipients.as_slice(), self.recipient_kind) {
            ([], _) | (_, None) => return Err(FcmError::EmptyRecipients),
            ([single], _) => payload.to = Some(single.target()),
            (recipients, Some(RecipientKind::Device)) => {
                if recipients.len() > MAX_DEVICES {
                    return Err(FcmError::DeviceLimitExceeded {
                        count: recipients.len(),
                        max: MAX_DEVICES,
                    });
                }
                payload.registration_ids =
                    Some(recipients.iter().map(Recipient::target).collect());
            }
            (_, Some(RecipientKind::Topic)) => payload.condition = Some(self.topic_condition()?),
        }

        payload.collapse_key = self.collapse_key.clone().filter(|key| !key.is_empty());
        payload.data = self.data.clone().filter(|data| !data.is_empty());
        payload.priority = self.priority;
        payload.content_available = self.content_available.filter(|&flag| flag);
        payload.notification = self
            .notification
            .clone()
            .filter(Notification::has_notification_data);

        Ok(payload)
    }

    /// Serialize straight to the JSON request body.
    pub fn to_json(&self) -> Result<String, FcmError> {
        Ok(serde_json::to_string(&self.serialize()?)?)
    }

    fn topic_condition(&self) -> Result<String, FcmError> {
        let topics = self.recipients.len();
        if topics > MAX_TOPICS {
            return Err(FcmError::TopicLimitExceeded {
                count: topics,
                max: MAX_TOPICS,
            });
        }

        let pattern = self
            .condition
            .as_deref()
            .filter(|condition| !condition.is_empty())
            .ok_or(FcmError::MissingCondition)?;

        let placeholders = pattern.matches(CONDITION_PLACEHOLDER).count();
        if placeholders != topics {
            return Err(FcmError::ConditionMismatch {
                placeholders,
                topics,
            });
        }

        let mut clauses = self.recipients.iter().filter_map(|recipient| match recipient {
            Recipient::Topic(topic) => Some(topic.condition_clause()),
            Recipient::Device(_) => None,
        });

        let mut condition = String::with_capacity(pattern.len());
        for (index, part) in pattern.split(CONDITION_PLACEHOLDER).enumerate() {
            if index > 0 {
                condition.extend(clauses.next());
            }
            condition.push_str(part);
        }

        Ok(condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipient::{Device, Topic};
    use serde_json::json;

    fn topics(message: &mut Message, names: &[&str]) {
        for name in names {
            message.add_recipient(Topic::new(*name)).unwrap();
        }
    }

    #[test]
    fn test_empty_recipients() {
        let message = Message::new();
        assert!(matches!(message.serialize(), Err(FcmError::EmptyRecipients)));
    }

    #[test]
    fn test_mixed_recipient_types_rejected() {
        let mut message = Message::new();
        message.add_recipient(Topic::new("breaking-news")).unwrap();

        let err = message.add_recipient(Device::new("deviceId")).unwrap_err();
        assert!(matches!(
            err,
            FcmError::TypeMismatch {
                expected: RecipientKind::Topic,
                found: RecipientKind::Device,
            }
        ));
        assert_eq!(message.recipients().len(), 1);
        assert_eq!(message.recipient_kind(), Some(RecipientKind::Topic));
    }

    #[test]
    fn test_single_topic() {
        let mut message = Message::new();
        message.add_recipient(Topic::new("breaking-news")).unwrap();

        assert_eq!(message.to_json().unwrap(), r#"{"to":"/topics/breaking-news"}"#);
    }

    #[test]
    fn test_single_topic_with_notification() {
        let mut message = Message::new();
        message
            .set_notification(Notification::new("test", "a nice testing notification"))
            .add_recipient(Topic::new("breaking-news"))
            .unwrap();

        assert_eq!(
            message.to_json().unwrap(),
            r#"{"to":"/topics/breaking-news","notification":{"title":"test","body":"a nice testing notification"}}"#
        );
    }

    #[test]
    fn test_single_device_with_notification() {
        let mut message = Message::new();
        message.set_notification(Notification::new("test", "a nice testing notification"));
        message.add_recipient(Device::new("deviceId")).unwrap();

        assert_eq!(
            message.to_json().unwrap(),
            r#"{"to":"deviceId","notification":{"title":"test","body":"a nice testing notification"}}"#
        );
    }

    #[test]
    fn test_content_available() {
        let mut message = Message::new();
        message
            .set_notification(Notification::new("test", "a nice testing notification"))
            .set_content_available(true);
        message.add_recipient(Device::new("deviceId")).unwrap();

        assert_eq!(
            message.to_json().unwrap(),
            r#"{"to":"deviceId","content_available":true,"notification":{"title":"test","body":"a nice testing notification"}}"#
        );
    }

    #[test]
    fn test_content_available_false_is_omitted() {
        let mut message = Message::new();
        message.set_content_available(false);
        message.add_recipient(Device::new("deviceId")).unwrap();

        assert_eq!(message.to_json().unwrap(), r#"{"to":"deviceId"}"#);
        assert!(!message.content_available());
    }

    #[test]
    fn test_only_target_key_without_options() {
        let mut message = Message::new();
        message.add_recipient(Device::new("deviceId")).unwrap();

        let value = serde_json::to_value(message.serialize().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["to"], "deviceId");
    }

    #[test]
    fn test_empty_options_are_omitted() {
        let mut message = Message::new();
        message
            .set_collapse_key("")
            .set_data(Map::new())
            .set_notification(Notification::new("", ""));
        message.add_recipient(Device::new("deviceId")).unwrap();

        assert_eq!(message.to_json().unwrap(), r#"{"to":"deviceId"}"#);
    }

    #[test]
    fn test_all_options() {
        let mut data = Map::new();
        data.insert("article_id".to_string(), json!(42));

        let mut message = Message::new();
        message
            .set_collapse_key("score_update")
            .set_data(data)
            .set_priority(Priority::High)
            .set_content_available(true)
            .set_notification(Notification::new("Goal", "2-1"));
        message.add_recipient(Device::new("a")).unwrap();
        message.add_recipient(Device::new("b")).unwrap();

        let value = serde_json::to_value(message.serialize().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "registration_ids": ["a", "b"],
                "collapse_key": "score_update",
                "data": {"article_id": 42},
                "priority": "high",
                "content_available": true,
                "notification": {"title": "Goal", "body": "2-1"}
            })
        );
    }

    #[test]
    fn test_multiple_devices_preserve_order() {
        let mut message = Message::new();
        for token in ["c", "a", "b"] {
            message.add_recipient(Device::new(token)).unwrap();
        }

        let payload = message.serialize().unwrap();
        assert_eq!(payload.to, None);
        assert_eq!(
            payload.registration_ids,
            Some(vec!["c".to_string(), "a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_device_limit() {
        let mut message = Message::new();
        for i in 0..MAX_DEVICES {
            message.add_recipient(Device::new(format!("token-{i}"))).unwrap();
        }
        assert!(message.serialize().is_ok());

        message.add_recipient(Device::new("one-too-many")).unwrap();
        assert!(matches!(
            message.serialize(),
            Err(FcmError::DeviceLimitExceeded { count: 1001, max: 1000 })
        ));
    }

    #[test]
    fn test_multiple_topics_without_condition() {
        let mut message = Message::new();
        topics(&mut message, &["breaking-news", "another topic"]);

        assert!(matches!(message.serialize(), Err(FcmError::MissingCondition)));

        message.set_condition("");
        assert!(matches!(message.serialize(), Err(FcmError::MissingCondition)));
    }

    #[test]
    fn test_condition_placeholder_mismatch() {
        let mut message = Message::new();
        topics(&mut message, &["a", "b"]);
        message.set_condition("%s && %s || %s");

        assert!(matches!(
            message.serialize(),
            Err(FcmError::ConditionMismatch {
                placeholders: 3,
                topics: 2
            })
        ));
    }

    #[test]
    fn test_condition_with_too_few_placeholders() {
        let mut message = Message::new();
        topics(&mut message, &["a", "b"]);
        message.set_condition("%s");

        assert!(matches!(
            message.serialize(),
            Err(FcmError::ConditionMismatch {
                placeholders: 1,
                topics: 2
            })
        ));
    }

    #[test]
    fn test_time_to_live_not_serialized() {
        let mut message = Message::new();
        message.set_time_to_live(60);
        message.add_recipient(Device::new("deviceId")).unwrap();

        assert_eq!(message.to_json().unwrap(), r#"{"to":"deviceId"}"#);
        assert_eq!(message.time_to_live(), Some(60));
    }

    #[test]
    fn test_topic_limit_checked_before_condition() {
        let mut message = Message::new();
        topics(&mut message, &["a", "b", "c", "d"]);
        assert!(matches!(
            message.serialize(),
            Err(FcmError::TopicLimitExceeded { count: 4, max: 3 })
        ));

        message.set_condition("%s && %s && %s && %s");
        assert!(matches!(
            message.serialize(),
            Err(FcmError::TopicLimitExceeded { count: 4, max: 3 })
        ));
    }

    #[test]
    fn test_condition_substitution() {
        let mut message = Message::new();
        topics(&mut message, &["TopicA", "TopicB", "TopicC"]);
        message.set_condition("%s && (%s || %s)");

        assert_eq!(
            message.to_json().unwrap(),
            r#"{"condition":"'TopicA' in topics && ('TopicB' in topics || 'TopicC' in topics)"}"#
        );
    }

    #[test]
    fn test_serialize_is_repeatable() {
        let mut message = Message::new();
        topics(&mut message, &["a", "b"]);
        message.set_condition("%s || %s");

        let first = message.serialize().unwrap();
        let second = message.serialize().unwrap();
        assert_eq!(first, second);
        assert_eq!(message.recipients().len(), 2);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" normal ".parse::<Priority>().unwrap(), Priority::Normal);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::High.to_string(), "high");
    }
}
