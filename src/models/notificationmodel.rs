use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::providermodel::ProviderType;
use super::requestmodel::RequestStatus;

/// Typed notification payloads. Each kind carries exactly the fields its
/// recipients need, instead of an open-ended untyped blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    NewJob {
        request_id: Uuid,
        service_type: ProviderType,
    },
    JobAccepted {
        request_id: Uuid,
        tracking_id: String,
    },
    StatusUpdate {
        request_id: Uuid,
        status: RequestStatus,
    },
    KycReviewed {
        document_id: Uuid,
        status: crate::models::providermodel::VerificationStatus,
    },
}

impl NotificationKind {
    pub fn type_str(&self) -> &str {
        match self {
            NotificationKind::NewJob { .. } => "new_job",
            NotificationKind::JobAccepted { .. } => "job_accepted",
            NotificationKind::StatusUpdate { .. } => "status_update",
            NotificationKind::KycReviewed { .. } => "kyc_reviewed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub data: Json<NotificationKind>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let kind = NotificationKind::JobAccepted {
            request_id: Uuid::nil(),
            tracking_id: "RSA-8F3K2Q".to_string(),
        };
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["type"], "job_accepted");
        assert_eq!(value["tracking_id"], "RSA-8F3K2Q");
    }

    #[test]
    fn test_kind_roundtrip_matches_type_str() {
        let kind = NotificationKind::NewJob {
            request_id: Uuid::nil(),
            service_type: ProviderType::FuelDelivery,
        };
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["type"], kind.type_str());
        let back: NotificationKind = serde_json::from_value(value).unwrap();
        assert_eq!(back, kind);
    }
}
