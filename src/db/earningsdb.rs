// db/earningsdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::earningsmodel::Earning;

#[async_trait]
pub trait EarningsExt {
    /// Insert the earnings row for a completed request. The UNIQUE
    /// constraint on request_id makes a duplicate insert a no-op, so a
    /// request can never be paid out twice; None means the row already
    /// existed.
    async fn insert_earning(
        &self,
        provider_id: Uuid,
        request_id: Uuid,
        amount: i64,
        platform_fee: i64,
        net_amount: i64,
    ) -> Result<Option<Earning>, Error>;

    async fn get_earnings_for_provider(&self, provider_id: Uuid) -> Result<Vec<Earning>, Error>;
}

#[async_trait]
impl EarningsExt for DBClient {
    async fn insert_earning(
        &self,
        provider_id: Uuid,
        request_id: Uuid,
        amount: i64,
        platform_fee: i64,
        net_amount: i64,
    ) -> Result<Option<Earning>, Error> {
        sqlx::query_as::<_, Earning>(
            r#"
            INSERT INTO earnings (provider_id, request_id, amount, platform_fee, net_amount)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (request_id) DO NOTHING
            RETURNING id, provider_id, request_id, amount, platform_fee, net_amount, created_at
            "#,
        )
        .bind(provider_id)
        .bind(request_id)
        .bind(amount)
        .bind(platform_fee)
        .bind(net_amount)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_earnings_for_provider(&self, provider_id: Uuid) -> Result<Vec<Earning>, Error> {
        sqlx::query_as::<_, Earning>(
            r#"
            SELECT id, provider_id, request_id, amount, platform_fee, net_amount, created_at
            FROM earnings
            WHERE provider_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }
}
