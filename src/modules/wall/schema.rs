use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// `images` and `metadata` are selected as text so both stored encodings
/// reach [`parse_images`] and [`parse_metadata`].
#[derive(Debug, Clone, FromRow)]
pub struct PostEntity {
    pub id: i64,
    pub contenu: String,
    pub auteur_id: Uuid,
    pub auteur_nom: Option<String>,
    pub auteur_prenom: Option<String>,
    pub type_post: Option<String>,
    pub images: Option<String>,
    pub bien_id: Option<i64>,
    pub metadata: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentEntity {
    pub id: i64,
    pub post_id: i64,
    pub auteur_id: Uuid,
    pub auteur_nom: Option<String>,
    pub auteur_prenom: Option<String>,
    pub contenu: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostType {
    Texte,
    Photo,
}

impl PostType {
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Texte => "texte",
            PostType::Photo => "photo",
        }
    }
}

/// Decodes the `images` column: a JSON array of URLs, or a JSON string that
/// itself holds such an array. Anything else yields no images.
pub fn parse_images(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => {
            items.into_iter().filter_map(|v| v.as_str().map(str::to_string)).collect()
        }
        Ok(serde_json::Value::String(inner)) => {
            serde_json::from_str::<Vec<String>>(&inner).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

/// Decodes the `metadata` column: a JSON object, or a JSON string holding one.
pub fn parse_metadata(raw: Option<&str>) -> Option<serde_json::Value> {
    let value = serde_json::from_str::<serde_json::Value>(raw?).ok()?;
    let value = match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).ok()?,
        other => other,
    };
    value.is_object().then_some(value)
}
