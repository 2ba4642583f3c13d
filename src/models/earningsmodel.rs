use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per completed request. The UNIQUE constraint on request_id
/// backs the exactly-once guarantee.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Earning {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub request_id: Uuid,
    pub amount: i64,
    pub platform_fee: i64,
    pub net_amount: i64,
    pub created_at: DateTime<Utc>,
}
