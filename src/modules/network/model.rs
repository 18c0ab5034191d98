use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::network::schema::ContactRequestEntity;

#[derive(Debug, Clone)]
pub struct NewContactRequest {
    pub expediteur_id: Uuid,
    pub destinataire_id: Uuid,
    pub message: String,
    pub expediteur_nom: String,
    pub expediteur_prenom: String,
    pub destinataire_nom: String,
    pub destinataire_prenom: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestBody {
    pub contact_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 100, message = "Search term is too long"))]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactRequestsResponse {
    pub received: Vec<ContactRequestEntity>,
    pub sent: Vec<ContactRequestEntity>,
}
