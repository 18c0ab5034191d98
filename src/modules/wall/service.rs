use futures_util::future::join_all;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::{FEED_LIMIT, PHOTO_PLACEHOLDER},
    modules::{
        media::{
            model::{UploadConfig, UploadedFile},
            service::MediaService,
        },
        network::repository::ContactRequestRepository,
        profile::{repository::ProfileRepository, schema::ProfileEntity},
        wall::{
            model::{LikeResponse, NewComment, NewPost, PostResponse},
            repository::WallRepository,
            schema::{CommentEntity, PostEntity, PostType},
        },
    },
};

pub struct WallService<W, C, P>
where
    W: WallRepository + Send + Sync + ?Sized,
    C: ContactRequestRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    wall_repo: Arc<W>,
    contact_repo: Arc<C>,
    profile_repo: Arc<P>,
    media: MediaService,
}

impl<W, C, P> Clone for WallService<W, C, P>
where
    W: WallRepository + Send + Sync + ?Sized,
    C: ContactRequestRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        WallService {
            wall_repo: self.wall_repo.clone(),
            contact_repo: self.contact_repo.clone(),
            profile_repo: self.profile_repo.clone(),
            media: self.media.clone(),
        }
    }
}

impl<W, C, P> WallService<W, C, P>
where
    W: WallRepository + Send + Sync + ?Sized,
    C: ContactRequestRepository + Send + Sync + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
{
    pub fn with_dependencies(
        wall_repo: Arc<W>,
        contact_repo: Arc<C>,
        profile_repo: Arc<P>,
        media: MediaService,
    ) -> Self {
        WallService { wall_repo, contact_repo, profile_repo, media }
    }

    pub fn upload_limits(&self) -> &UploadConfig {
        self.media.upload_config()
    }

    /// The user's own id first, then every accepted contact, without duplicates.
    async fn feed_authors(&self, user_id: Uuid) -> Vec<Uuid> {
        let contacts = match self.contact_repo.find_accepted_contact_ids(&user_id).await {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!("Feed of {} limited to own posts, contact lookup failed: {:?}", user_id, e);
                Vec::new()
            }
        };

        let mut authors = vec![user_id];
        for id in contacts {
            if !authors.contains(&id) {
                authors.push(id);
            }
        }
        authors
    }

    async fn enrich(&self, post: PostEntity, user_id: Uuid) -> PostResponse {
        let post_id = post.id;
        let (likes, liked, comments) = tokio::join!(
            self.wall_repo.count_likes(post_id),
            self.wall_repo.has_liked(post_id, &user_id),
            self.wall_repo.count_comments(post_id),
        );

        let likes = likes.unwrap_or_else(|e| {
            log::warn!("Like count of post {} unavailable: {:?}", post_id, e);
            0
        });
        let liked = liked.unwrap_or_else(|e| {
            log::warn!("Like state of post {} unavailable: {:?}", post_id, e);
            false
        });
        let comments = comments.unwrap_or_else(|e| {
            log::warn!("Comment count of post {} unavailable: {:?}", post_id, e);
            0
        });

        PostResponse::from_entity(post, likes, liked, comments)
    }

    pub async fn get_feed(&self, user_id: Uuid) -> Result<Vec<PostResponse>, error::SystemError> {
        let authors = self.feed_authors(user_id).await;
        let posts = self.wall_repo.find_posts_by_authors(&authors, FEED_LIMIT).await?;

        Ok(join_all(posts.into_iter().map(|post| self.enrich(post, user_id))).await)
    }

    async fn author(&self, user_id: Uuid) -> Result<ProfileEntity, error::SystemError> {
        self.profile_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Profile not found"))
    }

    async fn existing_post(&self, post_id: i64) -> Result<PostEntity, error::SystemError> {
        self.wall_repo
            .find_post_by_id(post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    pub async fn create_post(
        &self,
        user_id: Uuid,
        content: &str,
        images: Vec<String>,
    ) -> Result<PostResponse, error::SystemError> {
        if content.trim().is_empty() && images.is_empty() {
            return Err(error::SystemError::bad_request("A post needs text or at least one image"));
        }
        self.publish(user_id, content, images).await
    }

    /// Uploads the files first. When none of them made it and there is no
    /// text, the post still goes out as a text post with the placeholder.
    pub async fn create_photo_post(
        &self,
        user_id: Uuid,
        content: &str,
        files: Vec<UploadedFile>,
    ) -> Result<PostResponse, error::SystemError> {
        if content.trim().is_empty() && files.is_empty() {
            return Err(error::SystemError::bad_request("A post needs text or at least one image"));
        }
        let urls = self.media.upload_post_images(files).await?;
        self.publish(user_id, content, urls).await
    }

    async fn publish(
        &self,
        user_id: Uuid,
        content: &str,
        images: Vec<String>,
    ) -> Result<PostResponse, error::SystemError> {
        let content = content.trim();
        let author = self.author(user_id).await?;
        let type_post = if images.is_empty() { PostType::Texte } else { PostType::Photo };
        let contenu = if content.is_empty() { PHOTO_PLACEHOLDER } else { content };

        let created = self
            .wall_repo
            .create_post(&NewPost {
                contenu: contenu.to_string(),
                auteur_id: user_id,
                auteur_nom: author.nom,
                auteur_prenom: author.prenom,
                type_post: type_post.as_str(),
                images,
            })
            .await?;

        Ok(PostResponse::from_entity(created, 0, false, 0))
    }

    pub async fn toggle_like(
        &self,
        user_id: Uuid,
        post_id: i64,
    ) -> Result<LikeResponse, error::SystemError> {
        self.existing_post(post_id).await?;

        let liked = if self.wall_repo.has_liked(post_id, &user_id).await? {
            self.wall_repo.delete_like(post_id, &user_id).await?;
            false
        } else {
            self.wall_repo.insert_like(post_id, &user_id).await?;
            true
        };

        let likes_count = self.wall_repo.count_likes(post_id).await?;
        Ok(LikeResponse { liked, likes_count })
    }

    pub async fn get_comments(&self, post_id: i64) -> Result<Vec<CommentEntity>, error::SystemError> {
        self.wall_repo.find_comments(post_id).await
    }

    pub async fn add_comment(
        &self,
        user_id: Uuid,
        post_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Comment cannot be empty"));
        }

        self.existing_post(post_id).await?;
        let author = self.author(user_id).await?;

        self.wall_repo
            .create_comment(&NewComment {
                post_id,
                auteur_id: user_id,
                auteur_nom: author.nom,
                auteur_prenom: author.prenom,
                contenu: content.to_string(),
            })
            .await
    }
}
