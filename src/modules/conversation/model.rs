use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::{message::schema::MessageEntity, profile::model::ContactResponse};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConversationBody {
    pub contact_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConversationQuery {
    #[validate(length(max = 100, message = "Search term is too long"))]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationDetail {
    pub id: i64,
    pub participant1_id: Uuid,
    pub participant2_id: Uuid,
    pub other_user: Option<ContactResponse>,
    pub last_message: Option<MessageEntity>,
    pub unread_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct UnreadResponse {
    pub unread: i64,
}
