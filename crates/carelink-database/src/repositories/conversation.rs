//! Conversation repository.
//!
//! Find-or-create relies on the UNIQUE constraint over the normalized
//! participant pair: INSERT .. ON CONFLICT DO NOTHING, then a SELECT
//! when the row already existed. Two concurrent starters converge on
//! the same conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::conversation::model::{Conversation, participant_pair};

/// A conversation as listed for one user: the other participant's
/// display fields, the latest message, and the unread count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationSummary {
    /// Conversation identifier.
    pub id: Uuid,
    /// Smaller participant user id.
    pub participant_low: Uuid,
    /// Larger participant user id.
    pub participant_high: Uuid,
    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest message (or creation).
    pub updated_at: DateTime<Utc>,
    /// The other participant's user id.
    pub other_user_id: Uuid,
    /// The other participant's username.
    pub other_username: String,
    /// The other participant's first name.
    pub other_first_name: Option<String>,
    /// The other participant's last name.
    pub other_last_name: Option<String>,
    /// The other participant's profile picture URL.
    pub other_profile_picture: Option<String>,
    /// Body of the latest message, if any.
    pub last_message_body: Option<String>,
    /// Timestamp of the latest message, if any.
    pub last_message_at: Option<DateTime<Utc>>,
    /// Messages from the other participant not yet read.
    pub unread_count: i64,
}

/// Repository for conversation lookup and atomic find-or-create.
#[derive(Debug, Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    /// Create a new conversation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a conversation by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Conversation>> {
        sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find conversation", e)
            })
    }

    /// Return the conversation for an unordered user pair, creating it
    /// if absent. The boolean is `true` when this call created it.
    pub async fn find_or_create(&self, a: Uuid, b: Uuid) -> AppResult<(Conversation, bool)> {
        let (low, high) = participant_pair(a, b);

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let inserted = sqlx::query_as::<_, Conversation>(
            "INSERT INTO conversations (participant_low, participant_high) VALUES ($1, $2) \
             ON CONFLICT (participant_low, participant_high) DO NOTHING RETURNING *",
        )
        .bind(low)
        .bind(high)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create conversation", e)
        })?;

        if let Some(conversation) = inserted {
            sqlx::query(
                "INSERT INTO conversation_participants (conversation_id, user_id) \
                 VALUES ($1, $2), ($1, $3)",
            )
            .bind(conversation.id)
            .bind(low)
            .bind(high)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to add participants", e)
            })?;

            tx.commit().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
            })?;
            return Ok((conversation, true));
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        // Lost the insert race (or the conversation predates this call).
        let existing = sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations WHERE participant_low = $1 AND participant_high = $2",
        )
        .bind(low)
        .bind(high)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load conversation", e)
        })?;

        Ok((existing, false))
    }

    /// List a user's conversations, most recently active first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ConversationSummary>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM conversations \
             WHERE participant_low = $1 OR participant_high = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count conversations", e)
        })?;

        let summaries = sqlx::query_as::<_, ConversationSummary>(
            "SELECT c.id, c.participant_low, c.participant_high, c.created_at, c.updated_at, \
             u.id AS other_user_id, u.username AS other_username, \
             u.first_name AS other_first_name, u.last_name AS other_last_name, \
             u.profile_picture AS other_profile_picture, \
             lm.body AS last_message_body, lm.sent_at AS last_message_at, \
             (SELECT COUNT(*) FROM messages m \
              WHERE m.conversation_id = c.id AND m.sender_id <> $1 AND m.is_read = FALSE) \
              AS unread_count \
             FROM conversations c \
             JOIN users u ON u.id = CASE WHEN c.participant_low = $1 \
                                         THEN c.participant_high ELSE c.participant_low END \
             LEFT JOIN LATERAL (SELECT body, sent_at FROM messages m \
                                WHERE m.conversation_id = c.id \
                                ORDER BY sent_at DESC LIMIT 1) lm ON TRUE \
             WHERE c.participant_low = $1 OR c.participant_high = $1 \
             ORDER BY c.updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list conversations", e)
        })?;

        Ok(PageResponse::new(
            summaries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
