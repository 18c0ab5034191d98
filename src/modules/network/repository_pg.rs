use uuid::Uuid;

use crate::{
    api::error,
    modules::network::{
        model::NewContactRequest,
        repository::{ContactRequestRepository, FriendRepository},
        schema::{ContactRequestEntity, FriendRelationEntity, RequestStatus},
    },
    utils::canonical_pair,
};

const REQUEST_COLUMNS: &str = r#"
    id, expediteur_id, destinataire_id, statut, message,
    expediteur_nom, expediteur_prenom, destinataire_nom, destinataire_prenom,
    created_at
"#;

#[derive(Clone)]
pub struct NetworkRepositoryPg {
    pool: sqlx::PgPool,
}

impl NetworkRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for NetworkRepositoryPg {
    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT CASE WHEN user1_id = $1 THEN user2_id ELSE user1_id END
            FROM relations_amis
            WHERE user1_id = $1 OR user2_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn find_relation(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<FriendRelationEntity>, error::SystemError> {
        let (user1, user2) = canonical_pair(*user_a, *user_b);

        let relation = sqlx::query_as::<_, FriendRelationEntity>(
            "SELECT user1_id, user2_id, created_at FROM relations_amis WHERE user1_id = $1 AND user2_id = $2",
        )
        .bind(user1)
        .bind(user2)
        .fetch_optional(&self.pool)
        .await?;

        Ok(relation)
    }

    async fn create_relation_via_procedure(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("SELECT creer_relation_amitie($1, $2)")
            .bind(user_a)
            .bind(user_b)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_relation(&self, user1: &Uuid, user2: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query(
            "INSERT INTO relations_amis (user1_id, user2_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user1)
        .bind(user2)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactRequestRepository for NetworkRepositoryPg {
    async fn find_accepted_contact_ids(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT
                CASE WHEN expediteur_id = $1 THEN destinataire_id ELSE expediteur_id END
            FROM demandes_contact
            WHERE (expediteur_id = $1 OR destinataire_id = $1)
            AND statut = 'accepte'
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn find_pending_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<ContactRequestEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM demandes_contact
            WHERE statut = 'en_attente'
            AND (
                (expediteur_id = $1 AND destinataire_id = $2)
                OR (expediteur_id = $2 AND destinataire_id = $1)
            )
            LIMIT 1
            "#
        );
        let request = sqlx::query_as::<_, ContactRequestEntity>(&sql)
            .bind(user_a)
            .bind(user_b)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn find_request_by_id(
        &self,
        request_id: i64,
    ) -> Result<Option<ContactRequestEntity>, error::SystemError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM demandes_contact WHERE id = $1");
        let request = sqlx::query_as::<_, ContactRequestEntity>(&sql)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn find_received_pending(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ContactRequestEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM demandes_contact
            WHERE destinataire_id = $1 AND statut = 'en_attente'
            ORDER BY created_at DESC
            "#
        );
        let requests = sqlx::query_as::<_, ContactRequestEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    async fn find_sent(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ContactRequestEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM demandes_contact
            WHERE expediteur_id = $1
            ORDER BY created_at DESC
            "#
        );
        let requests = sqlx::query_as::<_, ContactRequestEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    async fn create_request(
        &self,
        request: &NewContactRequest,
    ) -> Result<ContactRequestEntity, error::SystemError> {
        let sql = format!(
            r#"
            INSERT INTO demandes_contact (
                expediteur_id, destinataire_id, statut, message,
                expediteur_nom, expediteur_prenom, destinataire_nom, destinataire_prenom
            )
            VALUES ($1, $2, 'en_attente', $3, $4, $5, $6, $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, ContactRequestEntity>(&sql)
            .bind(request.expediteur_id)
            .bind(request.destinataire_id)
            .bind(&request.message)
            .bind(&request.expediteur_nom)
            .bind(&request.expediteur_prenom)
            .bind(&request.destinataire_nom)
            .bind(&request.destinataire_prenom)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<(), error::SystemError> {
        let rows = sqlx::query("UPDATE demandes_contact SET statut = $2 WHERE id = $1")
            .bind(request_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::not_found("Contact request not found"));
        }

        Ok(())
    }
}
