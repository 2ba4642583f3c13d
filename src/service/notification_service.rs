// service/notification_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::{NewNotification, NotificationExt}},
    events::{topics, EventHub},
    models::{
        notificationmodel::NotificationKind,
        providermodel::{KycDocument, ServiceProvider},
        requestmodel::{RequestStatus, ServiceRequest},
    },
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
    events: EventHub,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>, events: EventHub) -> Self {
        Self { db_client, events }
    }

    /// Fan out a new_job notification to every matching provider.
    pub async fn notify_new_request(
        &self,
        request: &ServiceRequest,
        providers: &[ServiceProvider],
    ) -> Result<(), ServiceError> {
        if providers.is_empty() {
            tracing::info!(
                request_id = %request.id,
                service_type = request.service_type.to_str(),
                "no matching providers to notify"
            );
            return Ok(());
        }

        let notifications: Vec<NewNotification> = providers
            .iter()
            .map(|p| NewNotification {
                user_id: p.user_id,
                title: "New Service Request".to_string(),
                message: format!(
                    "New {} request nearby",
                    request.service_type.display_name()
                ),
                kind: NotificationKind::NewJob {
                    request_id: request.id,
                    service_type: request.service_type,
                },
            })
            .collect();

        let inserted = self.db_client.insert_notifications(notifications).await?;
        tracing::info!(
            request_id = %request.id,
            providers = inserted.len(),
            "notified providers about new request"
        );

        for (notification_id, recipient) in inserted {
            self.events
                .publish(
                    &topics::notifications_for_user(recipient),
                    serde_json::json!({
                        "type": "change",
                        "table": "notifications",
                        "id": notification_id,
                    }),
                )
                .await;
        }

        Ok(())
    }

    pub async fn notify_job_accepted(&self, request: &ServiceRequest) -> Result<(), ServiceError> {
        self.store_and_publish(NewNotification {
            user_id: request.user_id,
            title: "Provider Found!".to_string(),
            message: "A provider has accepted your service request".to_string(),
            kind: NotificationKind::JobAccepted {
                request_id: request.id,
                tracking_id: request.tracking_id.clone(),
            },
        })
        .await
    }

    pub async fn notify_status_update(
        &self,
        request: &ServiceRequest,
        status: RequestStatus,
        label: &str,
    ) -> Result<(), ServiceError> {
        self.store_and_publish(NewNotification {
            user_id: request.user_id,
            title: "Status Update".to_string(),
            message: label.to_string(),
            kind: NotificationKind::StatusUpdate {
                request_id: request.id,
                status,
            },
        })
        .await
    }

    pub async fn notify_kyc_reviewed(
        &self,
        provider_user_id: Uuid,
        document: &KycDocument,
    ) -> Result<(), ServiceError> {
        self.store_and_publish(NewNotification {
            user_id: provider_user_id,
            title: "KYC Document Reviewed".to_string(),
            message: format!(
                "Your {} document was {}",
                document.document_type.to_str().replace('_', " "),
                document.status.to_str()
            ),
            kind: NotificationKind::KycReviewed {
                document_id: document.id,
                status: document.status,
            },
        })
        .await
    }

    async fn store_and_publish(&self, notification: NewNotification) -> Result<(), ServiceError> {
        let recipient = notification.user_id;
        let stored = self.db_client.insert_notification(notification).await?;

        tracing::info!(
            notification_id = %stored.id,
            recipient = %recipient,
            kind = stored.notification_type.as_str(),
            "stored notification"
        );

        self.events
            .publish(
                &topics::notifications_for_user(recipient),
                serde_json::json!({
                    "type": "change",
                    "table": "notifications",
                    "id": stored.id,
                }),
            )
            .await;

        Ok(())
    }
}
