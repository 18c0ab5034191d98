use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    EnAttente,
    Accepte,
    Refuse,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::EnAttente => "en_attente",
            RequestStatus::Accepte => "accepte",
            RequestStatus::Refuse => "refuse",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en_attente" => Some(RequestStatus::EnAttente),
            "accepte" => Some(RequestStatus::Accepte),
            "refuse" => Some(RequestStatus::Refuse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactRequestEntity {
    pub id: i64,
    pub expediteur_id: Uuid,
    pub destinataire_id: Uuid,
    pub statut: String,
    pub message: Option<String>,
    pub expediteur_nom: Option<String>,
    pub expediteur_prenom: Option<String>,
    pub destinataire_nom: Option<String>,
    pub destinataire_prenom: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ContactRequestEntity {
    pub fn status(&self) -> Option<RequestStatus> {
        RequestStatus::parse(&self.statut)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == Some(RequestStatus::EnAttente)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendRelationEntity {
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
