use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        listings::{
            model::{
                FavoriteResponse, ListingCommentResponse, ListingDetailResponse, ListingFilter,
                ListingResponse, ListingsResponse,
            },
            repository::ListingRepository,
            schema::{ListingEntity, ListingPhotoEntity},
        },
        profile::repository::ProfileRepository,
    },
};

pub struct ListingService<L, P>
where
    L: ListingRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    listing_repo: Arc<L>,
    profile_repo: Arc<P>,
}

impl<L, P> Clone for ListingService<L, P>
where
    L: ListingRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        ListingService {
            listing_repo: self.listing_repo.clone(),
            profile_repo: self.profile_repo.clone(),
        }
    }
}

impl<L, P> ListingService<L, P>
where
    L: ListingRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    pub fn with_dependencies(listing_repo: Arc<L>, profile_repo: Arc<P>) -> Self {
        ListingService { listing_repo, profile_repo }
    }

    async fn photos_by_listing(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<ListingPhotoEntity>>, error::SystemError> {
        let mut by_listing: HashMap<i64, Vec<ListingPhotoEntity>> = HashMap::new();
        for photo in self.listing_repo.find_photos(ids).await? {
            by_listing.entry(photo.annonce_id).or_default().push(photo);
        }
        Ok(by_listing)
    }

    /// Active listings matching the filter, with photos, the caller's
    /// favourites flagged, and the cities available for the city filter.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: &ListingFilter,
    ) -> Result<ListingsResponse, error::SystemError> {
        let (listings, villes, favorites) = tokio::try_join!(
            self.listing_repo.find_active(filter),
            self.listing_repo.find_cities(),
            self.listing_repo.find_favorite_ids(&user_id),
        )?;

        let ids: Vec<i64> = listings.iter().map(|l| l.id).collect();
        let mut photos = self.photos_by_listing(&ids).await?;

        let annonces = listings
            .into_iter()
            .map(|listing| {
                let is_favorite = favorites.contains(&listing.id);
                let listing_photos = photos.remove(&listing.id).unwrap_or_default();
                ListingResponse::new(listing, listing_photos, is_favorite)
            })
            .collect();

        Ok(ListingsResponse { annonces, villes })
    }

    async fn active_listing(&self, reference: &str) -> Result<ListingEntity, error::SystemError> {
        self.listing_repo
            .find_active_by_reference(reference)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Listing not found"))
    }

    pub async fn detail(
        &self,
        user_id: Uuid,
        reference: &str,
    ) -> Result<ListingDetailResponse, error::SystemError> {
        let listing = self.active_listing(reference).await?;
        let listing_ids = [listing.id];
        let (photos, comments, favorites) = tokio::try_join!(
            self.listing_repo.find_photos(&listing_ids),
            self.listing_repo.find_comments(listing.id),
            self.listing_repo.find_favorite_ids(&user_id),
        )?;

        let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.auteur_id).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors: HashMap<Uuid, (String, String)> = self
            .profile_repo
            .find_active_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, (p.nom, p.prenom)))
            .collect();

        let commentaires = comments
            .into_iter()
            .map(|comment| {
                let (nom, prenom) = authors.get(&comment.auteur_id).cloned().unzip();
                ListingCommentResponse::new(comment, nom, prenom)
            })
            .collect();

        let is_favorite = favorites.contains(&listing.id);
        Ok(ListingDetailResponse {
            annonce: ListingResponse::new(listing, photos, is_favorite),
            commentaires,
        })
    }

    pub async fn add_comment(
        &self,
        user_id: Uuid,
        reference: &str,
        texte: &str,
    ) -> Result<ListingCommentResponse, error::SystemError> {
        let texte = texte.trim();
        if texte.is_empty() {
            return Err(error::SystemError::bad_request("Comment cannot be empty"));
        }

        let listing = self.active_listing(reference).await?;
        let (comment, author) = tokio::try_join!(
            self.listing_repo.create_comment(listing.id, &user_id, texte),
            self.profile_repo.find_by_id(&user_id),
        )?;

        let (nom, prenom) = author.map(|p| (p.nom, p.prenom)).unzip();
        Ok(ListingCommentResponse::new(comment, nom, prenom))
    }

    /// Adds the listing to the caller's favourites, or removes it when it
    /// already is one.
    pub async fn toggle_favorite(
        &self,
        user_id: Uuid,
        listing_id: i64,
    ) -> Result<FavoriteResponse, error::SystemError> {
        if !self.listing_repo.exists(listing_id).await? {
            return Err(error::SystemError::not_found("Listing not found"));
        }

        let liked = if self.listing_repo.insert_favorite(&user_id, listing_id).await? {
            true
        } else {
            self.listing_repo.delete_favorite(&user_id, listing_id).await?;
            false
        };

        log::debug!("Favourite {} of {} is now {}", listing_id, user_id, liked);
        Ok(FavoriteResponse { liked })
    }
}
