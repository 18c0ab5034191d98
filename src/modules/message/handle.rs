use actix_web::{post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        conversation::repository::ConversationRepository,
        message::{
            model::SendMessageModel, repository::MessageRepository, schema::MessageEntity,
            service::MessageService,
        },
    },
    utils::ValidatedJson,
};

pub type MessageSvc =
    MessageService<dyn MessageRepository + Send + Sync, dyn ConversationRepository + Send + Sync>;

#[post("/{conversation_id}/messages")]
pub async fn send_message(
    message_svc: web::Data<MessageSvc>,
    conversation_id: web::Path<i64>,
    body: ValidatedJson<SendMessageModel>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let message = message_svc.send_message(sender_id, *conversation_id, &body.0.contenu).await?;
    Ok(success::Success::created(Some(message)).message("Message sent"))
}
