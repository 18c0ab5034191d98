use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::{cache_get, cache_set, Cache};
use crate::constants::PROFILE_CACHE_TTL;
use crate::modules::profile::model::{InsertProfile, ProfileResponse, SignupModel};
use crate::modules::profile::repository::ProfileRepository;

#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository + Send + Sync>,
    cache: Arc<dyn Cache + Send + Sync>,
}

impl ProfileService {
    pub fn with_dependencies(
        repo: Arc<dyn ProfileRepository + Send + Sync>,
        cache: Arc<dyn Cache + Send + Sync>,
    ) -> Self {
        info!("ProfileService initialized with dependencies");
        ProfileService { repo, cache }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ProfileResponse, error::SystemError> {
        let key = format!("profile:{id}");
        if let Some(cached) = cache_get::<ProfileResponse>(self.cache.as_ref(), &key).await? {
            info!("Profile {} found in cache", id);
            return Ok(cached);
        }

        let entity = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Profile not found"))?;

        let response = ProfileResponse::from(entity);
        cache_set(self.cache.as_ref(), &key, &response, PROFILE_CACHE_TTL).await?;
        info!("Profile {} cached", id);
        Ok(response)
    }

    /// Creates the member row once the hosted auth service has registered the account.
    /// `account_email` is the address carried by the caller's token, when present.
    pub async fn complete_signup(
        &self,
        id: Uuid,
        account_email: Option<&str>,
        form: SignupModel,
    ) -> Result<ProfileResponse, error::SystemError> {
        let email = form.email.trim();
        if let Some(account_email) = account_email {
            if !account_email.eq_ignore_ascii_case(email) {
                return Err(error::SystemError::bad_request(
                    "Email does not match the signed-in account",
                ));
            }
        }

        let nom = required(&form.last_name, "Last name cannot be empty")?;
        let prenom = required(&form.first_name, "First name cannot be empty")?;
        let ville = required(&form.city, "City cannot be empty")?;
        let region = required(&form.region, "Region cannot be empty")?;

        if !form.postal_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(error::SystemError::bad_request("Postal code must be 5 digits long"));
        }
        if let Some(siret) = &form.siret {
            if !siret.chars().all(|c| c.is_ascii_digit()) {
                return Err(error::SystemError::bad_request("SIRET must be 14 digits long"));
            }
        }

        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(error::SystemError::conflict("utilisateurs_profile"));
        }

        let profile = InsertProfile {
            id,
            email: email.to_string(),
            nom,
            prenom,
            statut_externe: form.user_type.statut_externe().to_string(),
            ville,
            code_postal: form.postal_code,
            region,
            societe: form.company.filter(|c| !c.trim().is_empty()),
            siret: form.siret.filter(|s| !s.is_empty()),
            questionnaire_data: form
                .questionnaire
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        };

        let created = self.repo.create(&profile).await?;
        self.cache.delete(&format!("profile:{id}")).await?;
        info!("Profile {} created", id);
        Ok(ProfileResponse::from(created))
    }
}

fn required(value: &str, message: &'static str) -> Result<String, error::SystemError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error::SystemError::bad_request(message));
    }
    Ok(value.to_string())
}
