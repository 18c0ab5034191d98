use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct InsertMessage {
    pub conversation_id: i64,
    pub expediteur_id: Uuid,
    pub contenu: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageModel {
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub contenu: String,
}
