use actix_web::{get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        network::{
            model::{ContactRequestBody, ContactRequestsResponse, SearchQuery},
            repository::NetworkRepo,
            schema::ContactRequestEntity,
            service::NetworkService,
        },
        notification::repository::NotificationRepository,
        profile::{model::ContactResponse, repository::ProfileRepository},
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type NetworkSvc = NetworkService<
    dyn NetworkRepo,
    dyn ProfileRepository + Send + Sync,
    dyn NotificationRepository + Send + Sync,
>;

#[get("/friends")]
pub async fn list_friends(
    network_svc: web::Data<NetworkSvc>,
    query: ValidatedQuery<SearchQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ContactResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = network_svc.get_friends(user_id, query.0.search.as_deref()).await?;
    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[get("/directory")]
pub async fn list_directory(
    network_svc: web::Data<NetworkSvc>,
    query: ValidatedQuery<SearchQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ContactResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let members = network_svc.get_directory(user_id, query.0.search.as_deref()).await?;
    Ok(success::Success::ok(Some(members)))
}

#[get("/requests")]
pub async fn list_requests(
    network_svc: web::Data<NetworkSvc>,
    req: HttpRequest,
) -> Result<success::Success<ContactRequestsResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = network_svc.get_requests(user_id).await?;
    Ok(success::Success::ok(Some(requests)).message("Contact requests retrieved successfully"))
}

#[post("/requests")]
pub async fn send_request(
    network_svc: web::Data<NetworkSvc>,
    body: ValidatedJson<ContactRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<ContactRequestEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let request = network_svc.send_request(sender_id, body.0.contact_id).await?;
    Ok(success::Success::created(Some(request)).message("Contact request sent"))
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_request(
    network_svc: web::Data<NetworkSvc>,
    request_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<ContactResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friend = network_svc.accept_request(user_id, *request_id).await?;
    Ok(success::Success::ok(Some(friend)).message("Contact request accepted"))
}

#[post("/requests/{request_id}/reject")]
pub async fn reject_request(
    network_svc: web::Data<NetworkSvc>,
    request_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    network_svc.reject_request(user_id, *request_id).await?;
    Ok(success::Success::no_content())
}
