use actix_web::{get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        listings::{
            model::{
                FavoriteResponse, ListingCommentModel, ListingCommentResponse,
                ListingDetailResponse, ListingFilter, ListingQuery, ListingsResponse,
                ToggleFavoriteBody,
            },
            repository::ListingRepository,
            service::ListingService,
        },
        profile::repository::ProfileRepository,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type ListingSvc =
    ListingService<dyn ListingRepository + Send + Sync, dyn ProfileRepository + Send + Sync>;

#[get("")]
pub async fn list_listings(
    listing_svc: web::Data<ListingSvc>,
    query: ValidatedQuery<ListingQuery>,
    req: HttpRequest,
) -> Result<success::Success<ListingsResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let filter = ListingFilter::from(query.0);
    let listings = listing_svc.list(user_id, &filter).await?;
    Ok(success::Success::ok(Some(listings)).message("Listings retrieved successfully"))
}

#[post("/favorites/toggle")]
pub async fn toggle_favorite(
    listing_svc: web::Data<ListingSvc>,
    body: ValidatedJson<ToggleFavoriteBody>,
    req: HttpRequest,
) -> Result<success::Success<FavoriteResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let favorite = listing_svc.toggle_favorite(user_id, body.0.annonce_id).await?;
    Ok(success::Success::ok(Some(favorite)))
}

#[get("/{reference}")]
pub async fn get_listing(
    listing_svc: web::Data<ListingSvc>,
    reference: web::Path<String>,
    req: HttpRequest,
) -> Result<success::Success<ListingDetailResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let listing = listing_svc.detail(user_id, &reference).await?;
    Ok(success::Success::ok(Some(listing)))
}

#[post("/{reference}/comments")]
pub async fn add_comment(
    listing_svc: web::Data<ListingSvc>,
    reference: web::Path<String>,
    body: ValidatedJson<ListingCommentModel>,
    req: HttpRequest,
) -> Result<success::Success<ListingCommentResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let comment = listing_svc.add_comment(user_id, &reference, &body.0.texte).await?;
    Ok(success::Success::created(Some(comment)).message("Comment added"))
}
