// db/providerdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::providermodel::{ProviderType, ServiceProvider, VerificationStatus};

#[async_trait]
pub trait ProviderExt {
    async fn create_provider(
        &self,
        user_id: Uuid,
        provider_type: ProviderType,
    ) -> Result<ServiceProvider, Error>;

    async fn get_provider_by_id(&self, provider_id: Uuid)
        -> Result<Option<ServiceProvider>, Error>;

    async fn get_provider_by_user(&self, user_id: Uuid)
        -> Result<Option<ServiceProvider>, Error>;

    async fn update_provider_availability(
        &self,
        provider_id: Uuid,
        is_available: bool,
    ) -> Result<ServiceProvider, Error>;

    async fn set_provider_blocked(
        &self,
        provider_id: Uuid,
        is_blocked: bool,
    ) -> Result<ServiceProvider, Error>;

    async fn set_provider_verification_status(
        &self,
        provider_id: Uuid,
        status: VerificationStatus,
    ) -> Result<ServiceProvider, Error>;

    /// Providers that should be notified about a new request: matching type,
    /// verified, available, and not blocked.
    async fn find_matching_providers(
        &self,
        provider_type: ProviderType,
    ) -> Result<Vec<ServiceProvider>, Error>;

    async fn get_providers(
        &self,
        status: Option<VerificationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ServiceProvider>, Error>;

    async fn provider_count(&self) -> Result<i64, Error>;
}

#[async_trait]
impl ProviderExt for DBClient {
    async fn create_provider(
        &self,
        user_id: Uuid,
        provider_type: ProviderType,
    ) -> Result<ServiceProvider, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            INSERT INTO service_providers (user_id, provider_type)
            VALUES ($1, $2)
            RETURNING id, user_id, provider_type, verification_status,
                      is_available, is_blocked, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(provider_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_provider_by_id(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<ServiceProvider>, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            SELECT id, user_id, provider_type, verification_status,
                   is_available, is_blocked, created_at, updated_at
            FROM service_providers
            WHERE id = $1
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_provider_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ServiceProvider>, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            SELECT id, user_id, provider_type, verification_status,
                   is_available, is_blocked, created_at, updated_at
            FROM service_providers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_provider_availability(
        &self,
        provider_id: Uuid,
        is_available: bool,
    ) -> Result<ServiceProvider, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            UPDATE service_providers
            SET is_available = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, provider_type, verification_status,
                      is_available, is_blocked, created_at, updated_at
            "#,
        )
        .bind(provider_id)
        .bind(is_available)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_provider_blocked(
        &self,
        provider_id: Uuid,
        is_blocked: bool,
    ) -> Result<ServiceProvider, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            UPDATE service_providers
            SET is_blocked = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, provider_type, verification_status,
                      is_available, is_blocked, created_at, updated_at
            "#,
        )
        .bind(provider_id)
        .bind(is_blocked)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_provider_verification_status(
        &self,
        provider_id: Uuid,
        status: VerificationStatus,
    ) -> Result<ServiceProvider, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            UPDATE service_providers
            SET verification_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, provider_type, verification_status,
                      is_available, is_blocked, created_at, updated_at
            "#,
        )
        .bind(provider_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_matching_providers(
        &self,
        provider_type: ProviderType,
    ) -> Result<Vec<ServiceProvider>, Error> {
        sqlx::query_as::<_, ServiceProvider>(
            r#"
            SELECT id, user_id, provider_type, verification_status,
                   is_available, is_blocked, created_at, updated_at
            FROM service_providers
            WHERE provider_type = $1
              AND verification_status = 'verified'
              AND is_available = TRUE
              AND is_blocked = FALSE
            "#,
        )
        .bind(provider_type)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_providers(
        &self,
        status: Option<VerificationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ServiceProvider>, Error> {
        match status {
            Some(status) => {
                sqlx::query_as::<_, ServiceProvider>(
                    r#"
                    SELECT id, user_id, provider_type, verification_status,
                           is_available, is_blocked, created_at, updated_at
                    FROM service_providers
                    WHERE verification_status = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ServiceProvider>(
                    r#"
                    SELECT id, user_id, provider_type, verification_status,
                           is_available, is_blocked, created_at, updated_at
                    FROM service_providers
                    ORDER BY created_at DESC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    async fn provider_count(&self) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM service_providers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
