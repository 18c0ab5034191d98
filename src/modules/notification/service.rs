use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::NOTIFICATION_LIMIT,
    modules::notification::{
        model::{NewNotification, NotificationListResponse},
        repository::NotificationRepository,
    },
};

pub struct NotificationService<R>
where
    R: NotificationRepository + Send + Sync + ?Sized,
{
    notification_repo: Arc<R>,
}

impl<R> Clone for NotificationService<R>
where
    R: NotificationRepository + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        NotificationService { notification_repo: self.notification_repo.clone() }
    }
}

impl<R> NotificationService<R>
where
    R: NotificationRepository + Send + Sync + ?Sized,
{
    pub fn with_dependencies(notification_repo: Arc<R>) -> Self {
        NotificationService { notification_repo }
    }

    /// Best effort: a failed insert is logged and never fails the caller's operation.
    pub async fn notify(&self, notification: NewNotification) {
        if let Err(e) = self.notification_repo.create_notification(&notification).await {
            log::warn!(
                "Failed to notify user {} ({}): {:?}",
                notification.user_id,
                notification.kind.as_str(),
                e
            );
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
    ) -> Result<NotificationListResponse, error::SystemError> {
        let notifications =
            self.notification_repo.find_notifications_by_user(&user_id, NOTIFICATION_LIMIT).await?;
        let unread = notifications.iter().filter(|n| !n.lu).count();
        Ok(NotificationListResponse { notifications, unread })
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, error::SystemError> {
        self.notification_repo.mark_all_read(&user_id).await
    }
}
