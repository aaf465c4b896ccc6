//! Messaging service.
//!
//! Conversations exist only between users who share an accepted match.
//! Find-or-create is atomic at the database level, so two users opening
//! a conversation with each other simultaneously converge on one row.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use carelink_core::error::AppError;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::repositories::conversation::ConversationSummary;
use carelink_database::repositories::{
    ConversationRepository, MatchRequestRepository, MessageRepository, UserRepository,
};
use carelink_entity::conversation::message::Message;
use carelink_entity::conversation::model::Conversation;

use crate::context::RequestContext;

/// Maximum accepted message length in characters.
const MAX_MESSAGE_LEN: usize = 5_000;

/// Result of opening a conversation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StartConversationResult {
    /// The conversation, existing or newly created.
    pub conversation: Conversation,
    /// Whether this call created it.
    pub created: bool,
}

/// Manages conversations and their messages.
#[derive(Debug, Clone)]
pub struct MessagingService {
    /// Conversation repository.
    conversation_repo: Arc<ConversationRepository>,
    /// Message repository.
    message_repo: Arc<MessageRepository>,
    /// Match request repository, for the accepted-match gate.
    match_repo: Arc<MatchRequestRepository>,
    /// User repository, for existence checks.
    user_repo: Arc<UserRepository>,
}

impl MessagingService {
    /// Creates a new messaging service.
    pub fn new(
        conversation_repo: Arc<ConversationRepository>,
        message_repo: Arc<MessageRepository>,
        match_repo: Arc<MatchRequestRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            conversation_repo,
            message_repo,
            match_repo,
            user_repo,
        }
    }

    /// Opens (or finds) the conversation with another user.
    ///
    /// Requires an accepted match between the two users.
    pub async fn start_conversation(
        &self,
        ctx: &RequestContext,
        other_user_id: Uuid,
    ) -> Result<StartConversationResult, AppError> {
        if other_user_id == ctx.user_id {
            return Err(AppError::validation(
                "Cannot start a conversation with yourself",
            ));
        }
        self.user_repo
            .find_by_id(other_user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self
            .match_repo
            .exists_accepted_between_users(ctx.user_id, other_user_id)
            .await?
        {
            return Err(AppError::authorization(
                "Messaging requires an accepted match between the two users",
            ));
        }

        let (conversation, created) = self
            .conversation_repo
            .find_or_create(ctx.user_id, other_user_id)
            .await?;
        if created {
            info!(
                user_id = %ctx.user_id,
                conversation_id = %conversation.id,
                "Started conversation"
            );
        }
        Ok(StartConversationResult {
            conversation,
            created,
        })
    }

    /// Lists the current user's conversations, most recently active first.
    pub async fn list_conversations(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<ConversationSummary>, AppError> {
        self.conversation_repo.list_for_user(ctx.user_id, &page).await
    }

    /// Lists messages in a conversation the current user participates in.
    pub async fn list_messages(
        &self,
        ctx: &RequestContext,
        conversation_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<Message>, AppError> {
        self.own_conversation(ctx, conversation_id).await?;
        self.message_repo
            .list_for_conversation(conversation_id, &page)
            .await
    }

    /// Posts a message to a conversation the current user participates in.
    pub async fn post_message(
        &self,
        ctx: &RequestContext,
        conversation_id: Uuid,
        body: &str,
    ) -> Result<Message, AppError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Message body must not be empty"));
        }
        if body.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::validation(format!(
                "Message body must not exceed {MAX_MESSAGE_LEN} characters"
            )));
        }
        self.own_conversation(ctx, conversation_id).await?;
        self.message_repo
            .create(conversation_id, ctx.user_id, body)
            .await
    }

    /// Marks the other participant's messages as read. Returns how many
    /// messages were newly marked.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        conversation_id: Uuid,
    ) -> Result<u64, AppError> {
        self.own_conversation(ctx, conversation_id).await?;
        self.message_repo.mark_read(conversation_id, ctx.user_id).await
    }

    async fn own_conversation(
        &self,
        ctx: &RequestContext,
        conversation_id: Uuid,
    ) -> Result<Conversation, AppError> {
        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Conversation not found"))?;
        if !conversation.has_participant(ctx.user_id) {
            return Err(AppError::authorization(
                "Conversation involves other users",
            ));
        }
        Ok(conversation)
    }
}
