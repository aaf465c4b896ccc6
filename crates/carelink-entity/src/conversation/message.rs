//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single message within a conversation.
///
/// Messages are append-only; only the `is_read` flag ever changes, when
/// the other participant acknowledges the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// Containing conversation.
    pub conversation_id: Uuid,
    /// Authoring participant.
    pub sender_id: Uuid,
    /// Message text.
    pub body: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// Whether the other participant has read the message.
    pub is_read: bool,
}
