use uuid::Uuid;

use crate::{
    api::error,
    modules::profile::{
        model::InsertProfile,
        repository::ProfileRepository,
        schema::{ProfileEntity, PROFILE_COLUMNS},
    },
};

#[derive(Clone)]
pub struct ProfileRepositoryPg {
    pool: sqlx::PgPool,
}

impl ProfileRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for ProfileRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ProfileEntity>, error::SystemError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM utilisateurs WHERE id = $1");
        let profile = sqlx::query_as::<_, ProfileEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn find_active_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<ProfileEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM utilisateurs WHERE id = ANY($1) AND actif = true"
        );
        let profiles = sqlx::query_as::<_, ProfileEntity>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }

    async fn find_all_active(&self) -> Result<Vec<ProfileEntity>, error::SystemError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM utilisateurs WHERE actif = true ORDER BY nom ASC"
        );
        let profiles = sqlx::query_as::<_, ProfileEntity>(&sql).fetch_all(&self.pool).await?;
        Ok(profiles)
    }

    async fn create(&self, profile: &InsertProfile) -> Result<ProfileEntity, error::SystemError> {
        let sql = format!(
            r#"
            INSERT INTO utilisateurs (
                id, email, nom, prenom, role, statut_externe,
                ville, code_postal, region, societe, siret,
                questionnaire_data, profile_completed, onboarding_step,
                actif, statut_validation
            )
            VALUES ($1, $2, $3, $4, 'externe', $5, $6, $7, $8, $9, $10, $11, true, 4, true, 'valide')
            RETURNING {PROFILE_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, ProfileEntity>(&sql)
            .bind(profile.id)
            .bind(&profile.email)
            .bind(&profile.nom)
            .bind(&profile.prenom)
            .bind(&profile.statut_externe)
            .bind(&profile.ville)
            .bind(&profile.code_postal)
            .bind(&profile.region)
            .bind(&profile.societe)
            .bind(&profile.siret)
            .bind(&profile.questionnaire_data)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }
}
