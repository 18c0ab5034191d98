use actix_web::web::{scope, ServiceConfig};

use crate::modules::{conversation::handle::*, message::handle::send_message};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/conversations")
            .service(get_conversations)
            .service(get_unread_total)
            .service(resolve_conversation)
            .service(get_messages)
            .service(send_message),
    );
}
