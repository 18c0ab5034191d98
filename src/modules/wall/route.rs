use crate::modules::wall::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/wall")
            .service(get_feed)
            .service(create_photo_post)
            .service(create_post)
            .service(toggle_like)
            .service(list_comments)
            .service(add_comment),
    );
}
