use uuid::Uuid;

use crate::{
    api::error,
    modules::conversation::{repository::ConversationRepository, schema::ConversationEntity},
};

const CONVERSATION_COLUMNS: &str =
    "id, participant1_id, participant2_id, created_at, COALESCE(updated_at, created_at) AS updated_at";

#[derive(Clone)]
pub struct ConversationRepositoryPg {
    pool: sqlx::PgPool,
}

impl ConversationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ConversationRepository for ConversationRepositoryPg {
    async fn find_by_id(
        &self,
        conversation_id: i64,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        let sql = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1");
        let conversation = sqlx::query_as::<_, ConversationEntity>(&sql)
            .bind(conversation_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(conversation)
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {CONVERSATION_COLUMNS}
            FROM conversations
            WHERE participant1_id = $1 OR participant2_id = $1
            ORDER BY updated_at DESC
            "#
        );
        let conversations = sqlx::query_as::<_, ConversationEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(conversations)
    }

    async fn get_or_create_via_procedure(
        &self,
        user_id: &Uuid,
        contact_id: &Uuid,
    ) -> Result<i64, error::SystemError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT get_ou_creer_conversation($1, $2)")
            .bind(user_id)
            .bind(contact_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    async fn insert(
        &self,
        participant1: &Uuid,
        participant2: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let sql = format!(
            r#"
            INSERT INTO conversations (participant1_id, participant2_id)
            VALUES ($1, $2)
            RETURNING {CONVERSATION_COLUMNS}
            "#
        );
        let conversation = sqlx::query_as::<_, ConversationEntity>(&sql)
            .bind(participant1)
            .bind(participant2)
            .fetch_one(&self.pool)
            .await?;

        Ok(conversation)
    }

    async fn touch(&self, conversation_id: i64) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
