use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "provider_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Mechanic,
    FuelDelivery,
    MedicalAid,
}

impl ProviderType {
    pub fn to_str(&self) -> &str {
        match self {
            ProviderType::Mechanic => "mechanic",
            ProviderType::FuelDelivery => "fuel_delivery",
            ProviderType::MedicalAid => "medical_aid",
        }
    }

    /// Human wording used in rider-facing notification messages.
    pub fn display_name(&self) -> &str {
        match self {
            ProviderType::Mechanic => "mechanic",
            ProviderType::FuelDelivery => "fuel delivery",
            ProviderType::MedicalAid => "medical aid",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    GovernmentId,
    BusinessLicense,
    VehicleRegistration,
    Insurance,
    MedicalLicense,
}

impl DocumentType {
    pub fn to_str(&self) -> &str {
        match self {
            DocumentType::GovernmentId => "government_id",
            DocumentType::BusinessLicense => "business_license",
            DocumentType::VehicleRegistration => "vehicle_registration",
            DocumentType::Insurance => "insurance",
            DocumentType::MedicalLicense => "medical_license",
        }
    }
}

/// Documents a provider must have individually verified before the
/// aggregate verification status can become verified.
pub fn required_documents(provider_type: ProviderType) -> &'static [DocumentType] {
    match provider_type {
        ProviderType::Mechanic => &[
            DocumentType::GovernmentId,
            DocumentType::BusinessLicense,
            DocumentType::VehicleRegistration,
        ],
        ProviderType::FuelDelivery => &[
            DocumentType::GovernmentId,
            DocumentType::BusinessLicense,
            DocumentType::VehicleRegistration,
            DocumentType::Insurance,
        ],
        ProviderType::MedicalAid => &[
            DocumentType::GovernmentId,
            DocumentType::MedicalLicense,
        ],
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider_type: ProviderType,
    pub verification_status: VerificationStatus,
    pub is_available: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct KycDocument {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub document_type: DocumentType,
    pub file_url: String,
    pub status: VerificationStatus,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
