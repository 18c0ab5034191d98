use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MessageEntity {
    pub id: i64,
    pub conversation_id: i64,
    pub expediteur_id: Uuid,
    pub contenu: String,
    pub lu: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
