// service/kyc_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, kycdb::KycExt, providerdb::ProviderExt},
    models::providermodel::{
        required_documents, DocumentType, KycDocument, ProviderType, ServiceProvider,
        VerificationStatus,
    },
    service::error::ServiceError,
};

/// A provider's aggregate verification status is a pure function of its
/// document statuses: any rejection rejects the provider, and only a full
/// set of individually verified required documents verifies it.
pub fn aggregate_status(
    provider_type: ProviderType,
    documents: &[KycDocument],
) -> VerificationStatus {
    if documents
        .iter()
        .any(|d| d.status == VerificationStatus::Rejected)
    {
        return VerificationStatus::Rejected;
    }

    let all_required_verified = required_documents(provider_type).iter().all(|required| {
        documents
            .iter()
            .any(|d| d.document_type == *required && d.status == VerificationStatus::Verified)
    });

    if all_required_verified {
        VerificationStatus::Verified
    } else {
        VerificationStatus::Pending
    }
}

#[derive(Debug, Clone)]
pub struct KycService {
    db_client: Arc<DBClient>,
}

impl KycService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn submit_document(
        &self,
        provider: &ServiceProvider,
        document_type: DocumentType,
        file_url: String,
    ) -> Result<KycDocument, ServiceError> {
        let document = self
            .db_client
            .upsert_kyc_document(provider.id, document_type, file_url)
            .await?;

        // A re-upload resets that document to pending, which can demote the
        // aggregate; recompute either way.
        self.recompute_aggregate(provider.id, provider.provider_type)
            .await?;

        Ok(document)
    }

    /// Admin review of a single document, followed by recomputation of the
    /// provider's aggregate verification status.
    pub async fn review_document(
        &self,
        document_id: Uuid,
        status: VerificationStatus,
        reviewed_by: Uuid,
    ) -> Result<(KycDocument, ServiceProvider), ServiceError> {
        if status == VerificationStatus::Pending {
            return Err(ServiceError::Validation(
                "Review must either verify or reject the document".to_string(),
            ));
        }

        let document = self
            .db_client
            .get_kyc_document(document_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Validation(format!("KYC document {} not found", document_id))
            })?;

        let provider = self
            .db_client
            .get_provider_by_id(document.provider_id)
            .await?
            .ok_or(ServiceError::ProviderNotFound(document.provider_id))?;

        let reviewed = self
            .db_client
            .set_kyc_document_status(document_id, status, reviewed_by)
            .await?;

        let provider = self
            .recompute_aggregate(provider.id, provider.provider_type)
            .await?;

        tracing::info!(
            document_id = %document_id,
            provider_id = %provider.id,
            document_status = status.to_str(),
            aggregate = provider.verification_status.to_str(),
            "kyc document reviewed"
        );

        Ok((reviewed, provider))
    }

    async fn recompute_aggregate(
        &self,
        provider_id: Uuid,
        provider_type: ProviderType,
    ) -> Result<ServiceProvider, ServiceError> {
        let documents = self
            .db_client
            .get_kyc_documents_for_provider(provider_id)
            .await?;

        let status = aggregate_status(provider_type, &documents);

        Ok(self
            .db_client
            .set_provider_verification_status(provider_id, status)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(document_type: DocumentType, status: VerificationStatus) -> KycDocument {
        KycDocument {
            id: Uuid::new_v4(),
            provider_id: Uuid::nil(),
            document_type,
            file_url: "https://files.example/doc.pdf".to_string(),
            status,
            reviewed_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_required_verified_is_verified() {
        let docs = vec![
            doc(DocumentType::GovernmentId, VerificationStatus::Verified),
            doc(DocumentType::MedicalLicense, VerificationStatus::Verified),
        ];
        assert_eq!(
            aggregate_status(ProviderType::MedicalAid, &docs),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn test_any_rejection_rejects() {
        let docs = vec![
            doc(DocumentType::GovernmentId, VerificationStatus::Verified),
            doc(DocumentType::MedicalLicense, VerificationStatus::Rejected),
        ];
        assert_eq!(
            aggregate_status(ProviderType::MedicalAid, &docs),
            VerificationStatus::Rejected
        );
    }

    #[test]
    fn test_missing_required_document_stays_pending() {
        let docs = vec![doc(DocumentType::GovernmentId, VerificationStatus::Verified)];
        assert_eq!(
            aggregate_status(ProviderType::MedicalAid, &docs),
            VerificationStatus::Pending
        );
    }

    #[test]
    fn test_pending_document_stays_pending() {
        let docs = vec![
            doc(DocumentType::GovernmentId, VerificationStatus::Verified),
            doc(DocumentType::MedicalLicense, VerificationStatus::Pending),
        ];
        assert_eq!(
            aggregate_status(ProviderType::MedicalAid, &docs),
            VerificationStatus::Pending
        );
    }

    #[test]
    fn test_no_documents_is_pending() {
        assert_eq!(
            aggregate_status(ProviderType::Mechanic, &[]),
            VerificationStatus::Pending
        );
    }

    #[test]
    fn test_extra_verified_documents_do_not_verify_without_required_set() {
        // Fuel delivery also requires insurance; three verified documents
        // without it stay pending.
        let docs = vec![
            doc(DocumentType::GovernmentId, VerificationStatus::Verified),
            doc(DocumentType::BusinessLicense, VerificationStatus::Verified),
            doc(
                DocumentType::VehicleRegistration,
                VerificationStatus::Verified,
            ),
        ];
        assert_eq!(
            aggregate_status(ProviderType::FuelDelivery, &docs),
            VerificationStatus::Pending
        );
    }
}
