use futures_util::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        conversation::{
            model::ConversationDetail, repository::ConversationRepository,
            schema::ConversationEntity,
        },
        message::{repository::MessageRepository, schema::MessageEntity},
        profile::{model::ContactResponse, repository::ProfileRepository},
    },
    utils::{canonical_pair, matches_search},
};

pub struct ConversationService<C, M, P>
where
    C: ConversationRepository + Send + Sync + ?Sized,
    M: MessageRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    conversation_repo: Arc<C>,
    message_repo: Arc<M>,
    profile_repo: Arc<P>,
}

impl<C, M, P> Clone for ConversationService<C, M, P>
where
    C: ConversationRepository + Send + Sync + ?Sized,
    M: MessageRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        ConversationService {
            conversation_repo: self.conversation_repo.clone(),
            message_repo: self.message_repo.clone(),
            profile_repo: self.profile_repo.clone(),
        }
    }
}

impl<C, M, P> ConversationService<C, M, P>
where
    C: ConversationRepository + Send + Sync + ?Sized,
    M: MessageRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    pub fn with_dependencies(
        conversation_repo: Arc<C>,
        message_repo: Arc<M>,
        profile_repo: Arc<P>,
    ) -> Self {
        ConversationService { conversation_repo, message_repo, profile_repo }
    }

    async fn detail(
        &self,
        conversation: ConversationEntity,
        user_id: Uuid,
    ) -> Result<ConversationDetail, error::SystemError> {
        let other_id = conversation.other_participant(&user_id);
        let (other, last_message, unread_count) = tokio::try_join!(
            self.profile_repo.find_by_id(&other_id),
            self.message_repo.find_last(conversation.id),
            self.message_repo.count_unread(conversation.id, &user_id),
        )?;

        Ok(ConversationDetail {
            id: conversation.id,
            participant1_id: conversation.participant1_id,
            participant2_id: conversation.participant2_id,
            other_user: other.map(ContactResponse::from),
            last_message,
            unread_count,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        })
    }

    pub async fn get_by_user_id(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<ConversationDetail>, error::SystemError> {
        let conversations = self.conversation_repo.find_by_user(&user_id).await?;
        let details =
            try_join_all(conversations.into_iter().map(|c| self.detail(c, user_id))).await?;

        let searching = search.is_some_and(|s| !s.trim().is_empty());
        if !searching {
            return Ok(details);
        }

        Ok(details
            .into_iter()
            .filter(|d| {
                d.other_user.as_ref().is_some_and(|u| matches_search(search, &u.nom, &u.prenom))
            })
            .collect())
    }

    /// Returns the conversation between the two users, creating it when needed.
    pub async fn resolve(
        &self,
        user_id: Uuid,
        contact_id: Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        if user_id == contact_id {
            return Err(error::SystemError::bad_request("Cannot start a conversation with yourself"));
        }

        let existing = self.conversation_repo.find_by_user(&user_id).await?;
        if let Some(found) = existing.into_iter().find(|c| c.other_participant(&user_id) == contact_id)
        {
            return Ok(found);
        }

        match self.conversation_repo.get_or_create_via_procedure(&user_id, &contact_id).await {
            Ok(id) => self
                .conversation_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| error::SystemError::not_found("Conversation not found")),
            Err(e) => {
                log::warn!("get_ou_creer_conversation unavailable, inserting manually: {:?}", e);
                let (user1, user2) = canonical_pair(user_id, contact_id);
                self.conversation_repo.insert(&user1, &user2).await
            }
        }
    }

    /// Messages oldest first; the other side's messages are marked read afterwards.
    pub async fn get_messages(
        &self,
        user_id: Uuid,
        conversation_id: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;

        if !conversation.has_participant(&user_id) {
            return Err(error::SystemError::forbidden("You are not part of this conversation"));
        }

        let messages = self.message_repo.find_by_conversation(conversation_id).await?;

        if let Err(e) = self.message_repo.mark_read(conversation_id, &user_id).await {
            log::warn!("Failed to mark conversation {} as read: {:?}", conversation_id, e);
        }

        Ok(messages)
    }

    pub async fn unread_total(&self, user_id: Uuid) -> Result<i64, error::SystemError> {
        self.message_repo.count_unread_for_user(&user_id).await
    }
}
