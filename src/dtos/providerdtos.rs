use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::providermodel::{DocumentType, ProviderType, VerificationStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProviderDto {
    pub provider_type: ProviderType,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityDto {
    pub is_available: bool,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UploadKycDocumentDto {
    pub document_type: DocumentType,

    #[validate(url(message = "Invalid file URL"))]
    pub file_url: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ReviewKycDocumentDto {
    /// Must be verified or rejected; leaving a document pending is not a review.
    pub status: VerificationStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderFilterQueryDto {
    pub status: Option<VerificationStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetBlockedDto {
    pub blocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kyc_upload_rejects_bad_url() {
        let dto = UploadKycDocumentDto {
            document_type: DocumentType::GovernmentId,
            file_url: "not a url".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_kyc_upload_accepts_https_url() {
        let dto = UploadKycDocumentDto {
            document_type: DocumentType::Insurance,
            file_url: "https://files.example/insurance.pdf".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
