use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::providermodel::ProviderType;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    OnTheWay,
    Reached,
    WorkStarted,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn to_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::OnTheWay => "on_the_way",
            RequestStatus::Reached => "reached",
            RequestStatus::WorkStarted => "work_started",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// The transition table for the request state machine, encoded as data.
    /// Acceptance and cancellation leave `pending` through their dedicated
    /// conditional updates; everything else is a single forward chain.
    pub fn allowed_next(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::Accepted, RequestStatus::Cancelled],
            RequestStatus::Accepted => &[RequestStatus::OnTheWay],
            RequestStatus::OnTheWay => &[RequestStatus::Reached],
            RequestStatus::Reached => &[RequestStatus::WorkStarted],
            RequestStatus::WorkStarted => &[RequestStatus::Completed],
            RequestStatus::Completed | RequestStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Label shown to the rider when the provider reaches this status.
    /// Statuses without a label produce no rider notification.
    pub fn rider_facing_label(&self) -> Option<&'static str> {
        match self {
            RequestStatus::OnTheWay => Some("Provider is on the way"),
            RequestStatus::Reached => Some("Provider has arrived"),
            RequestStatus::WorkStarted => Some("Work has started"),
            RequestStatus::Completed => Some("Service completed!"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_type: ProviderType,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub assigned_provider_id: Option<Uuid>,
    pub tracking_id: String,
    pub amount: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only audit row, one per status transition. Never mutated.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct JobTrackingEntry {
    pub id: Uuid,
    pub request_id: Uuid,
    pub status: RequestStatus,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_chain_only() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Accepted));
        assert!(RequestStatus::Accepted.can_transition_to(RequestStatus::OnTheWay));
        assert!(RequestStatus::OnTheWay.can_transition_to(RequestStatus::Reached));
        assert!(RequestStatus::Reached.can_transition_to(RequestStatus::WorkStarted));
        assert!(RequestStatus::WorkStarted.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn test_no_skipping_or_regressing() {
        assert!(!RequestStatus::Accepted.can_transition_to(RequestStatus::Reached));
        assert!(!RequestStatus::Accepted.can_transition_to(RequestStatus::Completed));
        assert!(!RequestStatus::Reached.can_transition_to(RequestStatus::OnTheWay));
        assert!(!RequestStatus::WorkStarted.can_transition_to(RequestStatus::Accepted));
    }

    #[test]
    fn test_cancel_only_from_pending() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Accepted.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::OnTheWay.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::WorkStarted.can_transition_to(RequestStatus::Cancelled));
    }

    #[test]
    fn test_replayed_transition_rejected() {
        // A double-submitted advance re-validates against the state the
        // first submit produced, and the chain never allows standing still
        // or stepping back.
        assert!(!RequestStatus::OnTheWay.can_transition_to(RequestStatus::OnTheWay));
        assert!(!RequestStatus::Reached.can_transition_to(RequestStatus::OnTheWay));
    }

    #[test]
    fn test_terminal_states() {
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::WorkStarted.is_terminal());
    }

    #[test]
    fn test_rider_facing_labels() {
        assert_eq!(
            RequestStatus::OnTheWay.rider_facing_label(),
            Some("Provider is on the way")
        );
        assert_eq!(RequestStatus::Pending.rider_facing_label(), None);
        assert_eq!(RequestStatus::Accepted.rider_facing_label(), None);
        assert_eq!(RequestStatus::Cancelled.rider_facing_label(), None);
    }
}
