//! Outbound notification types
//!
//! The serialized form is the audit-store wire format: a flat JSON
//! object with a `type` discriminator, channel fields, `timestamp`,
//! and `status`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Delivery channel for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery status recorded on a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Error,
}

/// Channel-specific notification content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotificationContent {
    Email {
        to: String,
        subject: String,
        body: String,
    },
    Sms {
        to: String,
        message: String,
    },
    Push {
        user_id: String,
        title: String,
        body: String,
        data: Value,
    },
}

/// A produced notification, as persisted to the audit store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(flatten)]
    pub content: NotificationContent,
    pub timestamp: DateTime<Utc>,
    pub status: NotificationStatus,
}

impl Notification {
    pub fn email(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::sent(NotificationContent::Email {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        })
    }

    pub fn sms(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self::sent(NotificationContent::Sms {
            to: to.into(),
            message: message.into(),
        })
    }

    pub fn push(
        user_id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self::sent(NotificationContent::Push {
            user_id: user_id.into(),
            title: title.into(),
            body: body.into(),
            data: data.unwrap_or_else(|| Value::Object(Default::default())),
        })
    }

    fn sent(content: NotificationContent) -> Self {
        Self {
            content,
            timestamp: Utc::now(),
            status: NotificationStatus::Sent,
        }
    }

    pub fn channel(&self) -> Channel {
        match self.content {
            NotificationContent::Email { .. } => Channel::Email,
            NotificationContent::Sms { .. } => Channel::Sms,
            NotificationContent::Push { .. } => Channel::Push,
        }
    }

    /// Audit store key for this notification
    pub fn audit_key(&self) -> String {
        audit_key(self.channel(), &self.timestamp)
    }
}

/// Key under which a notification is persisted: namespaced by channel
/// with a fractional-seconds timestamp component. Not a unique id;
/// identical sends in the same microsecond collide.
pub fn audit_key(channel: Channel, timestamp: &DateTime<Utc>) -> String {
    format!(
        "notification:{}:{}.{:06}",
        channel.as_str(),
        timestamp.timestamp(),
        timestamp.timestamp_subsec_micros()
    )
}

/// Key prefix for history scans; `*` matches every channel.
pub fn audit_key_prefix(channel: &str) -> String {
    if channel == "*" {
        "notification:".to_string()
    } else {
        format!("notification:{}:", channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_wire_shape() {
        let notification = Notification::email("u1@example.com", "Order ord-1 Confirmed", "body");
        let value = serde_json::to_value(&notification).unwrap();

        assert_eq!(value["type"], "email");
        assert_eq!(value["to"], "u1@example.com");
        assert_eq!(value["subject"], "Order ord-1 Confirmed");
        assert_eq!(value["body"], "body");
        assert_eq!(value["status"], "sent");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_sms_wire_shape() {
        let value = serde_json::to_value(Notification::sms("+1234567890", "hi")).unwrap();
        assert_eq!(value["type"], "sms");
        assert_eq!(value["to"], "+1234567890");
        assert_eq!(value["message"], "hi");
    }

    #[test]
    fn test_push_defaults_empty_data() {
        let value = serde_json::to_value(Notification::push("admin", "t", "b", None)).unwrap();
        assert_eq!(value["type"], "push");
        assert_eq!(value["user_id"], "admin");
        assert_eq!(value["data"], serde_json::json!({}));
    }

    #[test]
    fn test_round_trip() {
        let notification = Notification::push(
            "u1",
            "Order Confirmed",
            "Your order ord-1 is confirmed!",
            Some(serde_json::json!({ "order_id": "ord-1" })),
        );
        let json = serde_json::to_string(&notification).unwrap();
        let decoded: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, notification);
        assert_eq!(decoded.channel(), Channel::Push);
    }

    #[test]
    fn test_audit_key_format() {
        let timestamp = DateTime::from_timestamp(1_700_000_000, 123_456_000).unwrap();
        let key = audit_key(Channel::Email, &timestamp);
        assert_eq!(key, "notification:email:1700000000.123456");
        assert!(key.starts_with(&audit_key_prefix("email")));
    }

    #[test]
    fn test_prefix_wildcard() {
        assert_eq!(audit_key_prefix("*"), "notification:");
        assert_eq!(audit_key_prefix("push"), "notification:push:");
    }
}
