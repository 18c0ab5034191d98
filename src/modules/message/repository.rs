use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{model::InsertMessage, schema::MessageEntity},
};

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError>;

    /// Oldest first.
    async fn find_by_conversation(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    async fn find_last(
        &self,
        conversation_id: i64,
    ) -> Result<Option<MessageEntity>, error::SystemError>;

    /// Unread messages of the conversation sent by someone other than `reader_id`.
    async fn count_unread(
        &self,
        conversation_id: i64,
        reader_id: &Uuid,
    ) -> Result<i64, error::SystemError>;

    async fn count_unread_for_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn mark_read(
        &self,
        conversation_id: i64,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError>;
}
