use actix_web::{get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::profile::{
        model::{ProfileResponse, SignupModel},
        service::ProfileService,
    },
    utils::ValidatedJson,
};

#[get("")]
pub async fn get_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
) -> Result<success::Success<ProfileResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let profile = profile_service.get_by_id(id).await?;
    Ok(success::Success::ok(Some(profile)).message("Profile retrieved successfully"))
}

#[post("")]
pub async fn complete_signup(
    profile_service: web::Data<ProfileService>,
    body: ValidatedJson<SignupModel>,
    req: HttpRequest,
) -> Result<success::Success<ProfileResponse>, error::Error> {
    let claims = get_claims(&req)?;
    let profile = profile_service
        .complete_signup(claims.sub, claims.email.as_deref(), body.0)
        .await?;
    Ok(success::Success::created(Some(profile)).message("Signup successful"))
}
