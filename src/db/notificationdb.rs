// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodel::{Notification, NotificationKind};

pub struct NewNotification {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

#[async_trait]
pub trait NotificationExt {
    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, Error>;

    /// Batch insert, one round trip for the fan-out on request creation.
    /// Returns (notification id, recipient) pairs for event publication.
    async fn insert_notifications(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<(Uuid, Uuid)>, Error>;

    async fn get_notifications_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, Error>;

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, Error>;

    /// Only the recipient may flip the read flag.
    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Notification>, Error>;

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, notification_type, title, message, data)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, notification_type, title, message, data, read, created_at
            "#,
        )
        .bind(notification.user_id)
        .bind(notification.kind.type_str().to_string())
        .bind(notification.title)
        .bind(notification.message)
        .bind(Json(notification.kind))
        .fetch_one(&self.pool)
        .await
    }

    async fn insert_notifications(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<(Uuid, Uuid)>, Error> {
        if notifications.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids = Vec::with_capacity(notifications.len());
        let mut types = Vec::with_capacity(notifications.len());
        let mut titles = Vec::with_capacity(notifications.len());
        let mut messages = Vec::with_capacity(notifications.len());
        let mut payloads = Vec::with_capacity(notifications.len());

        for n in notifications {
            user_ids.push(n.user_id);
            types.push(n.kind.type_str().to_string());
            titles.push(n.title);
            messages.push(n.message);
            payloads.push(serde_json::to_value(&n.kind).unwrap_or_default());
        }

        sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
            INSERT INTO notifications (user_id, notification_type, title, message, data)
            SELECT * FROM UNNEST($1::uuid[], $2::varchar[], $3::varchar[], $4::text[], $5::jsonb[])
            RETURNING id, user_id
            "#,
        )
        .bind(user_ids)
        .bind(types)
        .bind(titles)
        .bind(messages)
        .bind(payloads)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_notifications_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, notification_type, title, message, data, read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Notification>, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, notification_type, title, message, data, read, created_at
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE")
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}
