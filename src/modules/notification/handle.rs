use actix_web::{get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::notification::{
        model::{MarkReadResponse, NotificationListResponse},
        repository::NotificationRepository,
        service::NotificationService,
    },
};

pub type NotificationSvc = NotificationService<dyn NotificationRepository + Send + Sync>;

#[get("")]
pub async fn list_notifications(
    notification_svc: web::Data<NotificationSvc>,
    req: HttpRequest,
) -> Result<success::Success<NotificationListResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let notifications = notification_svc.list(user_id).await?;
    Ok(success::Success::ok(Some(notifications)).message("Notifications retrieved successfully"))
}

#[post("/read")]
pub async fn mark_all_read(
    notification_svc: web::Data<NotificationSvc>,
    req: HttpRequest,
) -> Result<success::Success<MarkReadResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let updated = notification_svc.mark_all_read(user_id).await?;
    Ok(success::Success::ok(Some(MarkReadResponse { updated })))
}
