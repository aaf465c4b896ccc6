//! Message repository.

use sqlx::PgPool;
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::conversation::message::Message;

/// Repository for append-only conversation messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a message and bump the conversation's activity timestamp
    /// in one transaction.
    pub async fn create(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        body: &str,
    ) -> AppResult<Message> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (conversation_id, sender_id, body) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(body)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))?;

        sqlx::query("UPDATE conversations SET updated_at = $2 WHERE id = $1")
            .bind(conversation_id)
            .bind(message.sent_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to bump conversation", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(message)
    }

    /// List messages in a conversation, newest first.
    pub async fn list_for_conversation(
        &self,
        conversation_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Message>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE conversation_id = $1")
                .bind(conversation_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count messages", e)
                })?;

        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = $1 \
             ORDER BY sent_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(conversation_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))?;

        Ok(PageResponse::new(
            messages,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Mark all messages from the other participant as read.
    ///
    /// Returns the number of messages newly marked.
    pub async fn mark_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE \
             WHERE conversation_id = $1 AND sender_id <> $2 AND is_read = FALSE",
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark messages read", e)
        })?;
        Ok(result.rows_affected())
    }
}
