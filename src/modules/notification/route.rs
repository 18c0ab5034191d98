use actix_web::web::{scope, ServiceConfig};

use crate::modules::notification::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/notifications").service(list_notifications).service(mark_all_read));
}
