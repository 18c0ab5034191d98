use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const PROFILE_COLUMNS: &str = r#"
    id,
    COALESCE(email, '') AS email,
    COALESCE(nom, '') AS nom,
    COALESCE(prenom, '') AS prenom,
    COALESCE(role, 'externe') AS role,
    statut_externe,
    societe,
    ville,
    code_postal,
    region,
    COALESCE(profile_completed, false) AS profile_completed,
    COALESCE(actif, false) AS actif,
    created_at
"#;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub role: String,
    pub statut_externe: Option<String>,
    pub societe: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub region: Option<String>,
    pub profile_completed: bool,
    pub actif: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ProfileEntity {
    /// Roles shown in the directory: staff always, external users only when active.
    pub fn is_listable(&self) -> bool {
        match self.role.as_str() {
            "agent" | "admin" => true,
            "externe" => self.actif,
            _ => false,
        }
    }
}
