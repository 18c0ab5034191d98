use uuid::Uuid;

use crate::{
    api::error,
    modules::listings::{
        model::ListingFilter,
        schema::{ListingCommentEntity, ListingEntity, ListingPhotoEntity},
    },
};

#[async_trait::async_trait]
pub trait ListingRepository {
    /// Active listings matching the filter, newest first.
    async fn find_active(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingEntity>, error::SystemError>;

    /// Distinct cities of active listings, sorted.
    async fn find_cities(&self) -> Result<Vec<String>, error::SystemError>;

    async fn find_active_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<ListingEntity>, error::SystemError>;

    async fn exists(&self, listing_id: i64) -> Result<bool, error::SystemError>;

    /// Photos of the given listings, by `ordre`.
    async fn find_photos(
        &self,
        listing_ids: &[i64],
    ) -> Result<Vec<ListingPhotoEntity>, error::SystemError>;

    /// Oldest first.
    async fn find_comments(
        &self,
        listing_id: i64,
    ) -> Result<Vec<ListingCommentEntity>, error::SystemError>;

    async fn create_comment(
        &self,
        listing_id: i64,
        auteur_id: &Uuid,
        texte: &str,
    ) -> Result<ListingCommentEntity, error::SystemError>;

    async fn find_favorite_ids(&self, user_id: &Uuid) -> Result<Vec<i64>, error::SystemError>;

    /// Returns whether a row was inserted.
    async fn insert_favorite(
        &self,
        user_id: &Uuid,
        listing_id: i64,
    ) -> Result<bool, error::SystemError>;

    /// Returns whether a row was removed.
    async fn delete_favorite(
        &self,
        user_id: &Uuid,
        listing_id: i64,
    ) -> Result<bool, error::SystemError>;
}
