use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DemandeAmi,
    AmiAccepte,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::DemandeAmi => "demande_ami",
            NotificationKind::AmiAccepte => "ami_accepte",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationEntity {
    pub id: i64,
    pub user_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub _type: String,
    pub titre: String,
    pub contenu: Option<String>,
    pub related_id: Option<i64>,
    pub lu: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
