use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::profile::schema::ProfileEntity;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Professional,
    Seller,
    Buyer,
    Investor,
}

impl UserType {
    pub fn statut_externe(self) -> &'static str {
        match self {
            UserType::Professional => "agent_immobilier",
            UserType::Seller => "seller",
            UserType::Buyer => "buyer",
            UserType::Investor => "investor",
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: String,
    pub user_type: UserType,
    pub company: Option<String>,
    #[validate(length(equal = 14, message = "SIRET must be 14 digits long"))]
    pub siret: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,
    #[validate(length(equal = 5, message = "Postal code must be 5 digits long"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "Region cannot be empty"))]
    pub region: String,
    pub questionnaire: Option<serde_json::Value>,
}

pub struct InsertProfile {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub statut_externe: String,
    pub ville: String,
    pub code_postal: String,
    pub region: String,
    pub societe: Option<String>,
    pub siret: Option<String>,
    pub questionnaire_data: serde_json::Value,
}

/// Public view of another member, as listed in the network and chat screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactResponse {
    pub id: Uuid,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub role: String,
    pub statut_externe: Option<String>,
    pub label: &'static str,
}

impl ContactResponse {
    pub fn label_for(role: &str, statut_externe: Option<&str>) -> &'static str {
        match role {
            "admin" => return "Admin",
            "agent" => return "Agent",
            _ => {}
        }
        match statut_externe {
            Some("agent_immobilier") => "Pro Immo",
            Some("proprietaire") => "Propriétaire",
            Some("acheteur") => "Acheteur",
            Some("locataire") => "Locataire",
            Some("investisseur") => "Investisseur",
            _ => "Particulier",
        }
    }
}

impl From<ProfileEntity> for ContactResponse {
    fn from(entity: ProfileEntity) -> Self {
        let label = ContactResponse::label_for(&entity.role, entity.statut_externe.as_deref());
        ContactResponse {
            id: entity.id,
            nom: entity.nom,
            prenom: entity.prenom,
            email: entity.email,
            role: entity.role,
            statut_externe: entity.statut_externe,
            label,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub role: String,
    pub statut_externe: Option<String>,
    pub label: String,
    pub societe: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub region: Option<String>,
    pub profile_completed: bool,
}

impl From<ProfileEntity> for ProfileResponse {
    fn from(entity: ProfileEntity) -> Self {
        let label = ContactResponse::label_for(&entity.role, entity.statut_externe.as_deref());
        ProfileResponse {
            id: entity.id,
            email: entity.email,
            nom: entity.nom,
            prenom: entity.prenom,
            role: entity.role,
            statut_externe: entity.statut_externe,
            label: label.to_string(),
            societe: entity.societe,
            ville: entity.ville,
            code_postal: entity.code_postal,
            region: entity.region,
            profile_completed: entity.profile_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_prefer_staff_roles() {
        assert_eq!(ContactResponse::label_for("admin", Some("acheteur")), "Admin");
        assert_eq!(ContactResponse::label_for("agent", None), "Agent");
        assert_eq!(ContactResponse::label_for("externe", Some("agent_immobilier")), "Pro Immo");
        assert_eq!(ContactResponse::label_for("externe", Some("proprietaire")), "Propriétaire");
        assert_eq!(ContactResponse::label_for("externe", Some("locataire")), "Locataire");
        assert_eq!(ContactResponse::label_for("externe", Some("investisseur")), "Investisseur");
        assert_eq!(ContactResponse::label_for("externe", Some("seller")), "Particulier");
        assert_eq!(ContactResponse::label_for("externe", None), "Particulier");
    }

    #[test]
    fn signup_validation_rejects_bad_fields() {
        let body = serde_json::json!({
            "email": "not-an-email",
            "firstName": "",
            "lastName": "Durand",
            "userType": "buyer",
            "city": "Lyon",
            "postalCode": "690",
            "region": "Auvergne-Rhône-Alpes"
        });
        let model: SignupModel = serde_json::from_value(body).unwrap();
        let errors = model.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("postal_code"));
        assert!(!fields.contains_key("city"));
    }

    #[test]
    fn unknown_user_type_does_not_deserialize() {
        let body = serde_json::json!({
            "email": "a@b.fr",
            "firstName": "Léa",
            "lastName": "Durand",
            "userType": "landlord",
            "city": "Lyon",
            "postalCode": "69001",
            "region": "ARA"
        });
        assert!(serde_json::from_value::<SignupModel>(body).is_err());
    }
}
