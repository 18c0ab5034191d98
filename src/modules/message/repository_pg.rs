use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{model::InsertMessage, repository::MessageRepository, schema::MessageEntity},
};

const MESSAGE_COLUMNS: &str =
    "id, conversation_id, expediteur_id, COALESCE(contenu, '') AS contenu, COALESCE(lu, false) AS lu, created_at";

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let sql = format!(
            r#"
            INSERT INTO messages_prives (conversation_id, expediteur_id, contenu, lu)
            VALUES ($1, $2, $3, false)
            RETURNING {MESSAGE_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, MessageEntity>(&sql)
            .bind(message.conversation_id)
            .bind(message.expediteur_id)
            .bind(&message.contenu)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_conversation(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages_prives WHERE conversation_id = $1 ORDER BY created_at ASC"
        );
        let messages = sqlx::query_as::<_, MessageEntity>(&sql)
            .bind(conversation_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    async fn find_last(
        &self,
        conversation_id: i64,
    ) -> Result<Option<MessageEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages_prives
            WHERE conversation_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#
        );
        let message = sqlx::query_as::<_, MessageEntity>(&sql)
            .bind(conversation_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message)
    }

    async fn count_unread(
        &self,
        conversation_id: i64,
        reader_id: &Uuid,
    ) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages_prives
            WHERE conversation_id = $1 AND expediteur_id <> $2 AND lu = false
            "#,
        )
        .bind(conversation_id)
        .bind(reader_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_unread_for_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages_prives m
            JOIN conversations c ON c.id = m.conversation_id
            WHERE (c.participant1_id = $1 OR c.participant2_id = $1)
            AND m.expediteur_id <> $1
            AND m.lu = false
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        conversation_id: i64,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE messages_prives
            SET lu = true
            WHERE conversation_id = $1 AND expediteur_id <> $2 AND lu = false
            "#,
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }
}
