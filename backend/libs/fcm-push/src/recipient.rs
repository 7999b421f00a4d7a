use std::fmt;

/// Device addressed by its FCM registration token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    token: String,
}

impl Device {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Topic addressed by name, without the `/topics/` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic {
    name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `/topics/<name>`, the form FCM expects in the `to` field
    pub fn path(&self) -> String {
        format!("/topics/{}", self.name)
    }

    /// `'<name>' in topics`, the form used inside condition expressions
    pub fn condition_clause(&self) -> String {
        format!("'{}' in topics", self.name)
    }
}

/// Message target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Device(Device),
    Topic(Topic),
}

impl Recipient {
    pub fn kind(&self) -> RecipientKind {
        match self {
            Recipient::Device(_) => RecipientKind::Device,
            Recipient::Topic(_) => RecipientKind::Topic,
        }
    }

    /// Value used in the `to` field when this is the only recipient.
    pub fn target(&self) -> String {
        match self {
            Recipient::Device(device) => device.token().to_string(),
            Recipient::Topic(topic) => topic.path(),
        }
    }
}

impl From<Device> for Recipient {
    fn from(device: Device) -> Self {
        Recipient::Device(device)
    }
}

impl From<Topic> for Recipient {
    fn from(topic: Topic) -> Self {
        Recipient::Topic(topic)
    }
}

/// Variant tag of a [`Recipient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientKind {
    Device,
    Topic,
}

impl fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipientKind::Device => write!(f, "device"),
            RecipientKind::Topic => write!(f, "topic"),
        }
    }
}
