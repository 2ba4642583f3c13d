// db/kycdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::providermodel::{DocumentType, KycDocument, VerificationStatus};

#[async_trait]
pub trait KycExt {
    /// Re-uploading the same document type replaces the previous file and
    /// resets its status to pending.
    async fn upsert_kyc_document(
        &self,
        provider_id: Uuid,
        document_type: DocumentType,
        file_url: String,
    ) -> Result<KycDocument, Error>;

    async fn get_kyc_document(&self, document_id: Uuid) -> Result<Option<KycDocument>, Error>;

    async fn get_kyc_documents_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<KycDocument>, Error>;

    async fn get_pending_kyc_documents(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<KycDocument>, Error>;

    async fn set_kyc_document_status(
        &self,
        document_id: Uuid,
        status: VerificationStatus,
        reviewed_by: Uuid,
    ) -> Result<KycDocument, Error>;
}

#[async_trait]
impl KycExt for DBClient {
    async fn upsert_kyc_document(
        &self,
        provider_id: Uuid,
        document_type: DocumentType,
        file_url: String,
    ) -> Result<KycDocument, Error> {
        sqlx::query_as::<_, KycDocument>(
            r#"
            INSERT INTO kyc_documents (provider_id, document_type, file_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (provider_id, document_type) DO UPDATE
            SET file_url = EXCLUDED.file_url,
                status = 'pending',
                reviewed_by = NULL,
                updated_at = NOW()
            RETURNING id, provider_id, document_type, file_url, status,
                      reviewed_by, created_at, updated_at
            "#,
        )
        .bind(provider_id)
        .bind(document_type)
        .bind(file_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_kyc_document(&self, document_id: Uuid) -> Result<Option<KycDocument>, Error> {
        sqlx::query_as::<_, KycDocument>(
            r#"
            SELECT id, provider_id, document_type, file_url, status,
                   reviewed_by, created_at, updated_at
            FROM kyc_documents
            WHERE id = $1
            "#,
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_kyc_documents_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<KycDocument>, Error> {
        sqlx::query_as::<_, KycDocument>(
            r#"
            SELECT id, provider_id, document_type, file_url, status,
                   reviewed_by, created_at, updated_at
            FROM kyc_documents
            WHERE provider_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_pending_kyc_documents(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<KycDocument>, Error> {
        sqlx::query_as::<_, KycDocument>(
            r#"
            SELECT id, provider_id, document_type, file_url, status,
                   reviewed_by, created_at, updated_at
            FROM kyc_documents
            WHERE status = 'pending'
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn set_kyc_document_status(
        &self,
        document_id: Uuid,
        status: VerificationStatus,
        reviewed_by: Uuid,
    ) -> Result<KycDocument, Error> {
        sqlx::query_as::<_, KycDocument>(
            r#"
            UPDATE kyc_documents
            SET status = $2, reviewed_by = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, provider_id, document_type, file_url, status,
                      reviewed_by, created_at, updated_at
            "#,
        )
        .bind(document_id)
        .bind(status)
        .bind(reviewed_by)
        .fetch_one(&self.pool)
        .await
    }
}
