use uuid::Uuid;

use crate::{api::error, modules::conversation::schema::ConversationEntity};

#[async_trait::async_trait]
pub trait ConversationRepository {
    async fn find_by_id(
        &self,
        conversation_id: i64,
    ) -> Result<Option<ConversationEntity>, error::SystemError>;

    /// Conversations where the user is either participant, most recently updated first.
    async fn find_by_user(&self, user_id: &Uuid)
        -> Result<Vec<ConversationEntity>, error::SystemError>;

    /// Delegates to the store's `get_ou_creer_conversation` procedure and returns the id.
    /// The procedure takes the caller first and orders the pair itself.
    async fn get_or_create_via_procedure(
        &self,
        user_id: &Uuid,
        contact_id: &Uuid,
    ) -> Result<i64, error::SystemError>;

    /// Plain insert; callers pass the canonical pair.
    async fn insert(
        &self,
        participant1: &Uuid,
        participant2: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError>;

    async fn touch(&self, conversation_id: i64) -> Result<(), error::SystemError>;
}
