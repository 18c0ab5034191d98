use actix_web::{get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        conversation::{
            model::{ConversationDetail, ConversationQuery, ResolveConversationBody, UnreadResponse},
            repository::ConversationRepository,
            schema::ConversationEntity,
            service::ConversationService,
        },
        message::{repository::MessageRepository, schema::MessageEntity},
        profile::repository::ProfileRepository,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type ConversationSvc = ConversationService<
    dyn ConversationRepository + Send + Sync,
    dyn MessageRepository + Send + Sync,
    dyn ProfileRepository + Send + Sync,
>;

#[get("")]
pub async fn get_conversations(
    conversation_svc: web::Data<ConversationSvc>,
    query: ValidatedQuery<ConversationQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ConversationDetail>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let conversations =
        conversation_svc.get_by_user_id(user_id, query.0.search.as_deref()).await?;
    Ok(success::Success::ok(Some(conversations)).message("Successfully retrieved conversations"))
}

#[get("/unread")]
pub async fn get_unread_total(
    conversation_svc: web::Data<ConversationSvc>,
    req: HttpRequest,
) -> Result<success::Success<UnreadResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let unread = conversation_svc.unread_total(user_id).await?;
    Ok(success::Success::ok(Some(UnreadResponse { unread })))
}

#[post("")]
pub async fn resolve_conversation(
    conversation_svc: web::Data<ConversationSvc>,
    body: ValidatedJson<ResolveConversationBody>,
    req: HttpRequest,
) -> Result<success::Success<ConversationEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let conversation = conversation_svc.resolve(user_id, body.0.contact_id).await?;
    Ok(success::Success::ok(Some(conversation)).message("Successfully resolved conversation"))
}

#[get("/{conversation_id}/messages")]
pub async fn get_messages(
    conversation_svc: web::Data<ConversationSvc>,
    conversation_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let messages = conversation_svc.get_messages(user_id, *conversation_id).await?;
    Ok(success::Success::ok(Some(messages)).message("Successfully retrieved messages"))
}
