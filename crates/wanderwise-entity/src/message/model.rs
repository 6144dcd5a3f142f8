//! Message row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `messages` table joined with the recipient's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// Author of the message.
    pub sender_id: Uuid,
    /// Addressee of the message.
    pub recipient_id: Uuid,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
    /// Joined `profiles.first_name` of the recipient.
    pub recipient_first_name: Option<String>,
    /// Joined `profiles.last_name` of the recipient.
    pub recipient_last_name: Option<String>,
    /// Joined `profiles.username` of the recipient.
    pub recipient_username: Option<String>,
}

impl Message {
    /// Recipient display name: first and last name, else username, else "a user".
    pub fn recipient_name(&self) -> String {
        let full = [
            self.recipient_first_name.as_deref(),
            self.recipient_last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        if !full.is_empty() {
            return full;
        }

        match self.recipient_username.as_deref().map(str::trim) {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => "a user".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            content: "Hello".to_string(),
            created_at: Utc::now(),
            recipient_first_name: None,
            recipient_last_name: None,
            recipient_username: None,
        }
    }

    #[test]
    fn test_recipient_name_fallbacks() {
        let mut m = message();
        assert_eq!(m.recipient_name(), "a user");

        m.recipient_username = Some("guide_joao".to_string());
        assert_eq!(m.recipient_name(), "guide_joao");

        m.recipient_first_name = Some("João".to_string());
        assert_eq!(m.recipient_name(), "João");

        m.recipient_last_name = Some("Costa".to_string());
        assert_eq!(m.recipient_name(), "João Costa");
    }
}
