// db/requestdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::providermodel::ProviderType;
use crate::models::requestmodel::{JobTrackingEntry, RequestStatus, ServiceRequest};

const REQUEST_COLUMNS: &str = r#"id, user_id, service_type, location, latitude, longitude,
description, status, assigned_provider_id, tracking_id, amount, created_at, updated_at"#;

#[async_trait]
pub trait RequestExt {
    async fn create_request(
        &self,
        user_id: Uuid,
        service_type: ProviderType,
        location: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        description: Option<String>,
        tracking_id: String,
    ) -> Result<ServiceRequest, Error>;

    async fn get_request_by_id(&self, request_id: Uuid)
        -> Result<Option<ServiceRequest>, Error>;

    async fn get_requests_by_user(&self, user_id: Uuid) -> Result<Vec<ServiceRequest>, Error>;

    /// The provider feed: open requests of the provider's type plus every
    /// request already assigned to this provider, newest first.
    async fn get_provider_feed(
        &self,
        provider_id: Uuid,
        provider_type: ProviderType,
    ) -> Result<Vec<ServiceRequest>, Error>;

    /// The claim. A conditional update that only applies while the request is
    /// still pending; the WHERE check and the write are atomic with respect
    /// to other writers, so at most one provider ever gets the row back.
    async fn claim_request(
        &self,
        request_id: Uuid,
        provider_id: Uuid,
    ) -> Result<Option<ServiceRequest>, Error>;

    /// Conditional status advance. Transition legality is the orchestrator's
    /// job, but the write only applies while the row still holds the status
    /// the orchestrator validated against; zero rows means a concurrent
    /// writer moved the request first.
    async fn update_request_status(
        &self,
        request_id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<Option<ServiceRequest>, Error>;

    /// Set the gross amount when the request completes.
    async fn set_request_amount(
        &self,
        request_id: Uuid,
        amount: i64,
    ) -> Result<ServiceRequest, Error>;

    /// The cancellation analogue of the claim: only applies while pending.
    async fn cancel_request(&self, request_id: Uuid) -> Result<Option<ServiceRequest>, Error>;

    async fn add_tracking_entry(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        note: String,
    ) -> Result<JobTrackingEntry, Error>;

    async fn get_tracking_for_request(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<JobTrackingEntry>, Error>;

    async fn request_count(&self) -> Result<i64, Error>;

    async fn request_count_by_status(&self, status: RequestStatus) -> Result<i64, Error>;
}

#[async_trait]
impl RequestExt for DBClient {
    async fn create_request(
        &self,
        user_id: Uuid,
        service_type: ProviderType,
        location: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        description: Option<String>,
        tracking_id: String,
    ) -> Result<ServiceRequest, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            INSERT INTO service_requests
            (user_id, service_type, location, latitude, longitude, description, tracking_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(service_type)
        .bind(location)
        .bind(latitude)
        .bind(longitude)
        .bind(description)
        .bind(tracking_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_request_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<ServiceRequest>, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM service_requests
            WHERE id = $1
            "#
        ))
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_requests_by_user(&self, user_id: Uuid) -> Result<Vec<ServiceRequest>, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM service_requests
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_provider_feed(
        &self,
        provider_id: Uuid,
        provider_type: ProviderType,
    ) -> Result<Vec<ServiceRequest>, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM service_requests
            WHERE (status = 'pending' AND service_type = $2)
               OR assigned_provider_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(provider_id)
        .bind(provider_type)
        .fetch_all(&self.pool)
        .await
    }

    async fn claim_request(
        &self,
        request_id: Uuid,
        provider_id: Uuid,
    ) -> Result<Option<ServiceRequest>, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            UPDATE service_requests
            SET status = 'accepted', assigned_provider_id = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_request_status(
        &self,
        request_id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<Option<ServiceRequest>, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            UPDATE service_requests
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_request_amount(
        &self,
        request_id: Uuid,
        amount: i64,
    ) -> Result<ServiceRequest, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            UPDATE service_requests
            SET amount = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
    }

    async fn cancel_request(&self, request_id: Uuid) -> Result<Option<ServiceRequest>, Error> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            r#"
            UPDATE service_requests
            SET status = 'cancelled', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn add_tracking_entry(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        note: String,
    ) -> Result<JobTrackingEntry, Error> {
        sqlx::query_as::<_, JobTrackingEntry>(
            r#"
            INSERT INTO job_tracking (request_id, status, note)
            VALUES ($1, $2, $3)
            RETURNING id, request_id, status, note, created_at
            "#,
        )
        .bind(request_id)
        .bind(status)
        .bind(note)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_tracking_for_request(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<JobTrackingEntry>, Error> {
        sqlx::query_as::<_, JobTrackingEntry>(
            r#"
            SELECT id, request_id, status, note, created_at
            FROM job_tracking
            WHERE request_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn request_count(&self) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM service_requests")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn request_count_by_status(&self, status: RequestStatus) -> Result<i64, Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM service_requests WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0)
    }
}
