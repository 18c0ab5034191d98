use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConversationEntity {
    pub id: i64,
    pub participant1_id: Uuid,
    pub participant2_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationEntity {
    pub fn has_participant(&self, user_id: &Uuid) -> bool {
        self.participant1_id == *user_id || self.participant2_id == *user_id
    }

    /// The participant that is not `user_id`.
    pub fn other_participant(&self, user_id: &Uuid) -> Uuid {
        if self.participant1_id == *user_id {
            self.participant2_id
        } else {
            self.participant1_id
        }
    }
}
