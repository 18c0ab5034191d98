use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// `prix` and `surface` are numeric columns read as `float8`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ListingEntity {
    pub id: i64,
    pub reference: String,
    pub client_reference: String,
    pub titre: String,
    pub texte: String,
    pub code_type: String,
    pub contact_nom: String,
    pub contact_email: String,
    pub contact_telephone: String,
    pub code_postal: String,
    pub ville: String,
    pub nb_pieces: Option<i32>,
    pub nb_chambres: Option<i32>,
    pub surface: Option<f64>,
    pub annee_construction: Option<i32>,
    pub dpe_etiquette_conso: String,
    pub dpe_valeur_conso: Option<i32>,
    pub dpe_etiquette_ges: String,
    pub type_transaction: String,
    pub prix: f64,
    pub honoraires_payeurs: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ListingPhotoEntity {
    pub id: i64,
    pub annonce_id: i64,
    pub url: String,
    pub ordre: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ListingCommentEntity {
    pub id: i64,
    pub annonce_id: i64,
    pub auteur_id: Uuid,
    pub texte: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "V")]
    Vente,
    #[serde(rename = "L")]
    Location,
}

impl TransactionType {
    pub fn code(self) -> &'static str {
        match self {
            TransactionType::Vente => "V",
            TransactionType::Location => "L",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "V" => Some(TransactionType::Vente),
            "L" => Some(TransactionType::Location),
            _ => None,
        }
    }
}
