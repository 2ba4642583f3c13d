use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    earningsmodel::Earning, providermodel::ProviderType, requestmodel::RequestStatus,
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestDto {
    pub service_type: ProviderType,

    #[validate(length(
        min = 3,
        max = 255,
        message = "Location must be between 3 and 255 characters"
    ))]
    pub location: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: Option<f64>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusDto {
    pub status: RequestStatus,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Earnings list plus the aggregate the provider dashboard shows.
#[derive(Debug, Serialize, Deserialize)]
pub struct EarningsSummaryDto {
    pub total_net: i64,
    pub total_fees: i64,
    pub jobs_completed: usize,
    pub earnings: Vec<Earning>,
}

impl EarningsSummaryDto {
    pub fn from_earnings(earnings: Vec<Earning>) -> Self {
        EarningsSummaryDto {
            total_net: earnings.iter().map(|e| e.net_amount).sum(),
            total_fees: earnings.iter().map(|e| e.platform_fee).sum(),
            jobs_completed: earnings.len(),
            earnings,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatsDto {
    pub users: i64,
    pub providers: i64,
    pub requests: i64,
    pub pending_requests: i64,
    pub completed_requests: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_create_request_dto_requires_location() {
        let dto = CreateRequestDto {
            service_type: ProviderType::Mechanic,
            location: "12".to_string(),
            latitude: None,
            longitude: None,
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_request_dto_rejects_bad_coordinates() {
        let dto = CreateRequestDto {
            service_type: ProviderType::Mechanic,
            location: "12 Main St".to_string(),
            latitude: Some(123.0),
            longitude: None,
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_earnings_summary_totals() {
        let earning = |net: i64, fee: i64| Earning {
            id: Uuid::new_v4(),
            provider_id: Uuid::nil(),
            request_id: Uuid::new_v4(),
            amount: net + fee,
            platform_fee: fee,
            net_amount: net,
            created_at: Utc::now(),
        };
        let summary = EarningsSummaryDto::from_earnings(vec![earning(450, 50), earning(900, 100)]);
        assert_eq!(summary.total_net, 1350);
        assert_eq!(summary.total_fees, 150);
        assert_eq!(summary.jobs_completed, 2);
    }
}
