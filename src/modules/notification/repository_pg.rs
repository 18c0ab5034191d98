use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        model::NewNotification, repository::NotificationRepository, schema::NotificationEntity,
    },
};

#[derive(Clone)]
pub struct NotificationRepositoryPg {
    pool: sqlx::PgPool,
}

impl NotificationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationRepositoryPg {
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<(), error::SystemError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, type, titre, contenu, related_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.user_id)
        .bind(notification.kind.as_str())
        .bind(&notification.titre)
        .bind(&notification.contenu)
        .bind(notification.related_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_notifications_by_user(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let notifications = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, type, titre, contenu, related_id,
                   COALESCE(lu, false) AS lu, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            "UPDATE notifications SET lu = true WHERE user_id = $1 AND COALESCE(lu, false) = false",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }
}
