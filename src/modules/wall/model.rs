use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::wall::schema::{parse_images, parse_metadata, PostEntity};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub contenu: String,
    pub auteur_id: Uuid,
    pub auteur_nom: String,
    pub auteur_prenom: String,
    pub type_post: &'static str,
    pub images: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub auteur_id: Uuid,
    pub auteur_nom: String,
    pub auteur_prenom: String,
    pub contenu: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostModel {
    #[serde(default)]
    #[validate(length(max = 5000, message = "Post is too long"))]
    pub contenu: String,
    #[serde(default)]
    #[validate(length(max = 4, message = "A post holds at most 4 images"))]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentModel {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub contenu: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub contenu: String,
    pub auteur_id: Uuid,
    pub auteur_nom: Option<String>,
    pub auteur_prenom: Option<String>,
    pub type_post: Option<String>,
    pub images: Vec<String>,
    pub bien_id: Option<i64>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub likes_count: i64,
    pub is_liked: bool,
    pub commentaires_count: i64,
}

impl PostResponse {
    pub fn from_entity(
        entity: PostEntity,
        likes_count: i64,
        is_liked: bool,
        commentaires_count: i64,
    ) -> Self {
        let images = parse_images(entity.images.as_deref());
        let metadata = parse_metadata(entity.metadata.as_deref());
        PostResponse {
            id: entity.id,
            contenu: entity.contenu,
            auteur_id: entity.auteur_id,
            auteur_nom: entity.auteur_nom,
            auteur_prenom: entity.auteur_prenom,
            type_post: entity.type_post,
            images,
            bien_id: entity.bien_id,
            metadata,
            created_at: entity.created_at,
            likes_count,
            is_liked,
            commentaires_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i64,
}
