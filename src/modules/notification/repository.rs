use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{model::NewNotification, schema::NotificationEntity},
};

#[async_trait::async_trait]
pub trait NotificationRepository {
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<(), error::SystemError>;

    async fn find_notifications_by_user(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError>;

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, error::SystemError>;
}
