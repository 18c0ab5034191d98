use uuid::Uuid;

use crate::{
    api::error,
    modules::listings::{
        model::ListingFilter,
        repository::ListingRepository,
        schema::{ListingCommentEntity, ListingEntity, ListingPhotoEntity},
    },
};

const LISTING_COLUMNS: &str = r#"
    id::bigint AS id,
    reference,
    COALESCE(client_reference, '') AS client_reference,
    titre,
    COALESCE(texte, '') AS texte,
    COALESCE(code_type, '') AS code_type,
    COALESCE(contact_nom, '') AS contact_nom,
    COALESCE(contact_email, '') AS contact_email,
    COALESCE(contact_telephone, '') AS contact_telephone,
    code_postal,
    ville,
    nb_pieces,
    nb_chambres,
    surface::float8 AS surface,
    annee_construction,
    COALESCE(dpe_etiquette_conso, '') AS dpe_etiquette_conso,
    dpe_valeur_conso,
    COALESCE(dpe_etiquette_ges, '') AS dpe_etiquette_ges,
    type_transaction,
    prix::float8 AS prix,
    COALESCE(honoraires_payeurs, '') AS honoraires_payeurs,
    is_active,
    created_at,
    updated_at
"#;

const COMMENT_COLUMNS: &str = "id::bigint AS id, annonce_id::bigint AS annonce_id, auteur_id, texte, created_at";

#[derive(Clone)]
pub struct ListingRepositoryPg {
    pool: sqlx::PgPool,
}

impl ListingRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ListingRepository for ListingRepositoryPg {
    async fn find_active(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings_annonce
            WHERE is_active
              AND ($1::text IS NULL OR ville ILIKE '%' || $1 || '%')
              AND ($2::bigint IS NULL OR prix <= $2)
              AND ($3::bigint IS NULL OR surface >= $3)
              AND ($4::text IS NULL OR type_transaction = $4)
            ORDER BY created_at DESC
            "#
        );
        let listings = sqlx::query_as::<_, ListingEntity>(&sql)
            .bind(filter.ville.as_deref())
            .bind(filter.prix_max)
            .bind(filter.surface_min)
            .bind(filter.type_transaction.map(|t| t.code()))
            .fetch_all(&self.pool)
            .await?;

        Ok(listings)
    }

    async fn find_cities(&self) -> Result<Vec<String>, error::SystemError> {
        let cities = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT ville FROM listings_annonce WHERE is_active ORDER BY ville",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cities)
    }

    async fn find_active_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<ListingEntity>, error::SystemError> {
        let sql =
            format!("SELECT {LISTING_COLUMNS} FROM listings_annonce WHERE reference = $1 AND is_active");
        let listing = sqlx::query_as::<_, ListingEntity>(&sql)
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?;

        Ok(listing)
    }

    async fn exists(&self, listing_id: i64) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM listings_annonce WHERE id = $1)",
        )
        .bind(listing_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_photos(
        &self,
        listing_ids: &[i64],
    ) -> Result<Vec<ListingPhotoEntity>, error::SystemError> {
        let photos = sqlx::query_as::<_, ListingPhotoEntity>(
            r#"
            SELECT id::bigint AS id, annonce_id::bigint AS annonce_id, url, ordre::int4 AS ordre
            FROM listings_photo
            WHERE annonce_id = ANY($1)
            ORDER BY annonce_id, ordre
            "#,
        )
        .bind(listing_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    async fn find_comments(
        &self,
        listing_id: i64,
    ) -> Result<Vec<ListingCommentEntity>, error::SystemError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM listings_commentaire WHERE annonce_id = $1 ORDER BY created_at ASC"
        );
        let comments = sqlx::query_as::<_, ListingCommentEntity>(&sql)
            .bind(listing_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(comments)
    }

    async fn create_comment(
        &self,
        listing_id: i64,
        auteur_id: &Uuid,
        texte: &str,
    ) -> Result<ListingCommentEntity, error::SystemError> {
        let sql = format!(
            r#"
            INSERT INTO listings_commentaire (annonce_id, auteur_id, texte, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING {COMMENT_COLUMNS}
            "#
        );
        let comment = sqlx::query_as::<_, ListingCommentEntity>(&sql)
            .bind(listing_id)
            .bind(auteur_id)
            .bind(texte)
            .fetch_one(&self.pool)
            .await?;

        Ok(comment)
    }

    async fn find_favorite_ids(&self, user_id: &Uuid) -> Result<Vec<i64>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT annonce_id::bigint FROM listings_favori WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn insert_favorite(
        &self,
        user_id: &Uuid,
        listing_id: i64,
    ) -> Result<bool, error::SystemError> {
        let result = sqlx::query(
            r#"
            INSERT INTO listings_favori (user_id, annonce_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, annonce_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(listing_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_favorite(
        &self,
        user_id: &Uuid,
        listing_id: i64,
    ) -> Result<bool, error::SystemError> {
        let result =
            sqlx::query("DELETE FROM listings_favori WHERE user_id = $1 AND annonce_id = $2")
                .bind(user_id)
                .bind(listing_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
