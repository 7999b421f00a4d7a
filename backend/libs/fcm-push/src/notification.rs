use serde::Serialize;

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Display payload shown by the device
///
/// Serializes to a flat object; empty fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    body: String,
    #[serde(skip_serializing_if = "is_unset")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    sound: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    badge: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    color: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    click_action: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    subtitle: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// iOS badge count, sent as a string as the legacy API expects
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Android notifications sharing a tag replace each other in the drawer
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Icon color in `#rrggbb` form
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_click_action(mut self, click_action: impl Into<String>) -> Self {
        self.click_action = Some(click_action.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Whether any field would be displayed.
    pub fn has_notification_data(&self) -> bool {
        !self.title.is_empty()
            || !self.body.is_empty()
            || [
                &self.icon,
                &self.sound,
                &self.badge,
                &self.tag,
                &self.color,
                &self.click_action,
                &self.subtitle,
            ]
            .into_iter()
            .any(|field| !is_unset(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_body_serialization() {
        let notification = Notification::new("test", "a nice testing notification");
        let json = serde_json::to_string(&notification).unwrap();
        assert_eq!(
            json,
            r#"{"title":"test","body":"a nice testing notification"}"#
        );
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let notification = Notification::new("", "body only")
            .with_sound("")
            .with_icon("ic_launcher");
        let json = serde_json::to_string(&notification).unwrap();
        assert_eq!(json, r#"{"body":"body only","icon":"ic_launcher"}"#);
    }

    #[test]
    fn test_has_notification_data() {
        assert!(!Notification::default().has_notification_data());
        assert!(!Notification::new("", "").with_tag("").has_notification_data());
        assert!(Notification::new("", "").with_badge("3").has_notification_data());
        assert!(Notification::new("title", "").has_notification_data());
    }

    #[test]
    fn test_incremental_construction() {
        let mut notification = Notification::default();
        notification.set_title("hello").set_body("world");
        assert_eq!(notification.title(), "hello");
        assert_eq!(notification.body(), "world");
    }
}
