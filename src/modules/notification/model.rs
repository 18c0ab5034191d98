use serde::Serialize;
use uuid::Uuid;

use crate::modules::notification::schema::{NotificationEntity, NotificationKind};

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub titre: String,
    pub contenu: String,
    pub related_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationEntity>,
    pub unread: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}
