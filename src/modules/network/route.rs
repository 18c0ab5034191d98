use crate::modules::network::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/network")
            .service(list_friends)
            .service(list_directory)
            .service(list_requests)
            .service(send_request)
            .service(accept_request)
            .service(reject_request),
    );
}
