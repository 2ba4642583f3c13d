// service/request_service.rs
//
// The request lifecycle orchestrator. Every state transition of a service
// request goes through here so that tracking entries, notifications, and
// earnings stay consistent with the request's status.
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        earningsdb::EarningsExt,
        providerdb::ProviderExt,
        requestdb::RequestExt,
    },
    dtos::requestdtos::CreateRequestDto,
    events::{topics, EventHub},
    models::{
        providermodel::{ServiceProvider, VerificationStatus},
        requestmodel::{JobTrackingEntry, RequestStatus, ServiceRequest},
    },
    service::{error::ServiceError, notification_service::NotificationService},
    utils::{fees, tracking},
};

#[derive(Debug, Clone)]
pub struct RequestService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
    events: EventHub,
}

impl RequestService {
    pub fn new(
        db_client: Arc<DBClient>,
        notification_service: Arc<NotificationService>,
        events: EventHub,
    ) -> Self {
        Self {
            db_client,
            notification_service,
            events,
        }
    }

    /// Insert the request as pending and fan a new_job notification out to
    /// every verified, available, unblocked provider of the matching type.
    pub async fn create_request(
        &self,
        user_id: Uuid,
        data: CreateRequestDto,
    ) -> Result<ServiceRequest, ServiceError> {
        let request = self
            .db_client
            .create_request(
                user_id,
                data.service_type,
                data.location,
                data.latitude,
                data.longitude,
                data.description,
                tracking::generate_tracking_id(),
            )
            .await?;

        tracing::info!(
            request_id = %request.id,
            tracking_id = request.tracking_id.as_str(),
            service_type = request.service_type.to_str(),
            "service request created"
        );

        let providers = self
            .db_client
            .find_matching_providers(request.service_type)
            .await?;

        self.notification_service
            .notify_new_request(&request, &providers)
            .await?;

        self.publish_request_change(&request).await;

        Ok(request)
    }

    pub async fn list_own_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ServiceRequest>, ServiceError> {
        Ok(self.db_client.get_requests_by_user(user_id).await?)
    }

    /// Open requests of the provider's type plus the provider's own
    /// in-flight jobs, in one feed.
    pub async fn provider_feed(
        &self,
        provider: &ServiceProvider,
    ) -> Result<Vec<ServiceRequest>, ServiceError> {
        Ok(self
            .db_client
            .get_provider_feed(provider.id, provider.provider_type)
            .await?)
    }

    /// Claim a pending job for a provider. The pre-checks are fast local
    /// rejections; the conditional update in claim_request is what actually
    /// decides the race, so a concurrent acceptor loses with zero rows.
    pub async fn accept_job(
        &self,
        provider: &ServiceProvider,
        request_id: Uuid,
    ) -> Result<ServiceRequest, ServiceError> {
        if provider.is_blocked {
            return Err(ServiceError::ProviderBlocked);
        }
        if provider.verification_status != VerificationStatus::Verified {
            return Err(ServiceError::ProviderNotVerified);
        }
        if !provider.is_available {
            return Err(ServiceError::ProviderUnavailable);
        }

        let current = self
            .db_client
            .get_request_by_id(request_id)
            .await?
            .ok_or(ServiceError::RequestNotFound(request_id))?;

        if current.status != RequestStatus::Pending {
            return Err(ServiceError::JobAlreadyTaken);
        }
        if current.service_type != provider.provider_type {
            return Err(ServiceError::Validation(
                "Request does not match provider type".to_string(),
            ));
        }

        let claimed = self
            .db_client
            .claim_request(request_id, provider.id)
            .await?
            .ok_or(ServiceError::JobAlreadyTaken)?;

        tracing::info!(
            request_id = %claimed.id,
            provider_id = %provider.id,
            "provider claimed request"
        );

        self.db_client
            .add_tracking_entry(
                request_id,
                RequestStatus::Accepted,
                "Provider accepted the job".to_string(),
            )
            .await?;

        self.notification_service.notify_job_accepted(&claimed).await?;
        self.publish_request_change(&claimed).await;

        Ok(claimed)
    }

    /// Advance an assigned request one step along the status chain. The
    /// transition table is checked here, not trusted to the caller; only
    /// the assigned provider may advance. Reaching completed settles the
    /// earnings split exactly once.
    pub async fn advance_status(
        &self,
        provider: &ServiceProvider,
        request_id: Uuid,
        next_status: RequestStatus,
        note: Option<String>,
    ) -> Result<ServiceRequest, ServiceError> {
        let current = self
            .db_client
            .get_request_by_id(request_id)
            .await?
            .ok_or(ServiceError::RequestNotFound(request_id))?;

        if current.assigned_provider_id != Some(provider.id) {
            return Err(ServiceError::UnauthorizedRequestAccess(
                provider.user_id,
                request_id,
            ));
        }

        // Acceptance and cancellation have their own guarded operations.
        if matches!(
            next_status,
            RequestStatus::Pending | RequestStatus::Accepted | RequestStatus::Cancelled
        ) || !current.status.can_transition_to(next_status)
        {
            return Err(ServiceError::InvalidTransition {
                from: current.status,
                to: next_status,
            });
        }

        // Conditional write: if a concurrent call (e.g. a double-submitted
        // update) moved the request after our read, zero rows come back and
        // the stale transition is rejected instead of regressing the status.
        let updated = self
            .db_client
            .update_request_status(request_id, current.status, next_status)
            .await?
            .ok_or(ServiceError::InvalidTransition {
                from: current.status,
                to: next_status,
            })?;

        self.db_client
            .add_tracking_entry(
                request_id,
                next_status,
                note.unwrap_or_else(|| {
                    format!("Status updated to {}", next_status.to_str())
                }),
            )
            .await?;

        if let Some(label) = next_status.rider_facing_label() {
            self.notification_service
                .notify_status_update(&updated, next_status, label)
                .await?;
        }

        let updated = if next_status == RequestStatus::Completed {
            self.settle_earnings(&updated).await?
        } else {
            updated
        };

        tracing::info!(
            request_id = %updated.id,
            from = current.status.to_str(),
            to = next_status.to_str(),
            "request status advanced"
        );

        self.publish_request_change(&updated).await;

        Ok(updated)
    }

    /// Cancel a request while it is still pending. The conditional update
    /// loses to a provider who accepted in the meantime.
    pub async fn cancel_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<ServiceRequest, ServiceError> {
        let current = self
            .db_client
            .get_request_by_id(request_id)
            .await?
            .ok_or(ServiceError::RequestNotFound(request_id))?;

        if current.user_id != user_id {
            return Err(ServiceError::UnauthorizedRequestAccess(user_id, request_id));
        }

        let cancelled = self
            .db_client
            .cancel_request(request_id)
            .await?
            .ok_or(ServiceError::CancellationTooLate)?;

        self.db_client
            .add_tracking_entry(
                request_id,
                RequestStatus::Cancelled,
                "Request cancelled by user".to_string(),
            )
            .await?;

        tracing::info!(request_id = %request_id, "request cancelled");

        self.publish_request_change(&cancelled).await;

        Ok(cancelled)
    }

    pub async fn tracking_history(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<Vec<JobTrackingEntry>, ServiceError> {
        let request = self
            .db_client
            .get_request_by_id(request_id)
            .await?
            .ok_or(ServiceError::RequestNotFound(request_id))?;

        let is_rider = request.user_id == user_id;
        let is_assigned_provider = match self.db_client.get_provider_by_user(user_id).await? {
            Some(provider) => request.assigned_provider_id == Some(provider.id),
            None => false,
        };

        if !is_rider && !is_assigned_provider {
            return Err(ServiceError::UnauthorizedRequestAccess(user_id, request_id));
        }

        Ok(self.db_client.get_tracking_for_request(request_id).await?)
    }

    /// Fee split at completion: gross defaults to 500 when no amount was
    /// agreed, platform keeps 10%, provider gets the rest. The earnings
    /// insert is idempotent on request_id.
    async fn settle_earnings(
        &self,
        request: &ServiceRequest,
    ) -> Result<ServiceRequest, ServiceError> {
        let provider_id = request.assigned_provider_id.ok_or_else(|| {
            ServiceError::Validation("Completed request has no assigned provider".to_string())
        })?;

        let amount = request.amount.unwrap_or(fees::DEFAULT_JOB_AMOUNT);
        let platform_fee = fees::platform_fee(amount);
        let net_amount = fees::net_amount(amount);

        let earning = self
            .db_client
            .insert_earning(provider_id, request.id, amount, platform_fee, net_amount)
            .await?;

        match earning {
            Some(earning) => {
                tracing::info!(
                    request_id = %request.id,
                    provider_id = %provider_id,
                    amount,
                    platform_fee,
                    net_amount,
                    earning_id = %earning.id,
                    "earnings recorded"
                );
            }
            None => {
                tracing::warn!(
                    request_id = %request.id,
                    "earnings row already existed, skipping"
                );
            }
        }

        if request.amount.is_none() {
            Ok(self.db_client.set_request_amount(request.id, amount).await?)
        } else {
            Ok(request.clone())
        }
    }

    // Providers watch the broad table topic, riders their scoped sibling;
    // one change event to each is all the fan-out the feeds need.
    async fn publish_request_change(&self, request: &ServiceRequest) {
        self.events
            .publish_change(topics::SERVICE_REQUESTS, request.id, Some(request.user_id))
            .await;
    }
}
