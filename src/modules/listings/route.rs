use crate::modules::listings::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/listings")
            .service(list_listings)
            .service(toggle_favorite)
            .service(get_listing)
            .service(add_comment),
    );
}
