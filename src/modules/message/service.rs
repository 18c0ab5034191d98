use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        conversation::repository::ConversationRepository,
        message::{model::InsertMessage, repository::MessageRepository, schema::MessageEntity},
    },
};

pub struct MessageService<M, C>
where
    M: MessageRepository + Send + Sync + ?Sized,
    C: ConversationRepository + Send + Sync + ?Sized,
{
    message_repo: Arc<M>,
    conversation_repo: Arc<C>,
}

impl<M, C> Clone for MessageService<M, C>
where
    M: MessageRepository + Send + Sync + ?Sized,
    C: ConversationRepository + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        MessageService {
            message_repo: self.message_repo.clone(),
            conversation_repo: self.conversation_repo.clone(),
        }
    }
}

impl<M, C> MessageService<M, C>
where
    M: MessageRepository + Send + Sync + ?Sized,
    C: ConversationRepository + Send + Sync + ?Sized,
{
    pub fn with_dependencies(message_repo: Arc<M>, conversation_repo: Arc<C>) -> Self {
        MessageService { message_repo, conversation_repo }
    }

    /// Stores an unread message and bumps the conversation to the top of both inboxes.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        conversation_id: i64,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Message cannot be empty"));
        }

        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;

        if !conversation.has_participant(&sender_id) {
            return Err(error::SystemError::forbidden("You are not part of this conversation"));
        }

        let message = self
            .message_repo
            .create(&InsertMessage {
                conversation_id,
                expediteur_id: sender_id,
                contenu: content.to_string(),
            })
            .await?;

        self.conversation_repo.touch(conversation_id).await?;

        Ok(message)
    }
}
