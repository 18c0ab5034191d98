use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::listings::schema::{
    ListingCommentEntity, ListingEntity, ListingPhotoEntity, TransactionType,
};

/// Raw list filters as typed in the search form. Values that do not parse
/// are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListingQuery {
    #[validate(length(max = 100, message = "City filter is too long"))]
    pub ville: Option<String>,
    pub prix_max: Option<String>,
    pub surface_min: Option<String>,
    #[serde(rename = "type")]
    pub type_transaction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub ville: Option<String>,
    pub prix_max: Option<i64>,
    pub surface_min: Option<i64>,
    pub type_transaction: Option<TransactionType>,
}

impl From<ListingQuery> for ListingFilter {
    fn from(query: ListingQuery) -> Self {
        fn trimmed(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        ListingFilter {
            ville: trimmed(query.ville),
            prix_max: trimmed(query.prix_max).and_then(|v| v.parse().ok()),
            surface_min: trimmed(query.surface_min).and_then(|v| v.parse().ok()),
            type_transaction: trimmed(query.type_transaction)
                .and_then(|v| TransactionType::from_code(&v)),
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, listing: &ListingEntity) -> bool {
        if let Some(ville) = &self.ville {
            if !listing.ville.to_lowercase().contains(&ville.to_lowercase()) {
                return false;
            }
        }
        if let Some(prix_max) = self.prix_max {
            if listing.prix > prix_max as f64 {
                return false;
            }
        }
        if let Some(surface_min) = self.surface_min {
            if !matches!(listing.surface, Some(s) if s >= surface_min as f64) {
                return false;
            }
        }
        if let Some(kind) = self.type_transaction {
            if listing.type_transaction != kind.code() {
                return false;
            }
        }
        true
    }
}

/// Whole euros with a space every three digits, e.g. `500 000 €`.
pub fn format_price(prix: f64) -> String {
    let amount = prix.round() as i64;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} €")
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    #[serde(flatten)]
    pub listing: ListingEntity,
    pub prix_format: String,
    pub photos: Vec<ListingPhotoEntity>,
    pub is_favorite: bool,
}

impl ListingResponse {
    pub fn new(listing: ListingEntity, photos: Vec<ListingPhotoEntity>, is_favorite: bool) -> Self {
        ListingResponse { prix_format: format_price(listing.prix), listing, photos, is_favorite }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub annonces: Vec<ListingResponse>,
    pub villes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingCommentResponse {
    pub id: i64,
    pub auteur_id: Uuid,
    pub auteur_nom: Option<String>,
    pub auteur_prenom: Option<String>,
    pub texte: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ListingCommentResponse {
    pub fn new(comment: ListingCommentEntity, nom: Option<String>, prenom: Option<String>) -> Self {
        ListingCommentResponse {
            id: comment.id,
            auteur_id: comment.auteur_id,
            auteur_nom: nom,
            auteur_prenom: prenom,
            texte: comment.texte,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingDetailResponse {
    #[serde(flatten)]
    pub annonce: ListingResponse,
    pub commentaires: Vec<ListingCommentResponse>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListingCommentModel {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub texte: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleFavoriteBody {
    pub annonce_id: i64,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(ville: &str, prix_max: &str, surface_min: &str, kind: &str) -> ListingQuery {
        ListingQuery {
            ville: Some(ville.into()),
            prix_max: Some(prix_max.into()),
            surface_min: Some(surface_min.into()),
            type_transaction: Some(kind.into()),
        }
    }

    #[test]
    fn filters_parse_and_ignore_unusable_values() {
        let filter = ListingFilter::from(query(" Lyon ", "300000", "45", "L"));
        assert_eq!(
            filter,
            ListingFilter {
                ville: Some("Lyon".into()),
                prix_max: Some(300000),
                surface_min: Some(45),
                type_transaction: Some(TransactionType::Location),
            }
        );

        let filter = ListingFilter::from(query("  ", "beaucoup", "45.5", "X"));
        assert_eq!(filter, ListingFilter::default());
        assert_eq!(ListingFilter::from(ListingQuery::default()), ListingFilter::default());
    }

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(500000.0), "500 000 €");
        assert_eq!(format_price(1250000.4), "1 250 000 €");
        assert_eq!(format_price(950.0), "950 €");
        assert_eq!(format_price(0.0), "0 €");
        assert_eq!(format_price(999.6), "1 000 €");
    }
}
