use super::PgStore;
use super::queries::{
    DELETE_DOCUMENT, INSERT_DOCUMENT, SELECT_DOCUMENTS_BY_OWNER, SELECT_DOCUMENT_OWNER,
};
use crate::application::ports::DocumentStore;
use crate::domain::{Document, DocumentId, NewDocument, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
struct DocumentRow {
    document_id: i64,
    document_user_id: i64,
    document_name: String,
    document_url: String,
    storage_provider: String,
    page_count: i32,
    uploaded_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            document_id: row.document_id,
            owner_id: row.document_user_id,
            name: row.document_name,
            url: row.document_url,
            storage_provider: row.storage_provider,
            page_count: row.page_count,
            uploaded_at: row.uploaded_at,
        }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create_document(&self, document: &NewDocument) -> Result<Document, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(INSERT_DOCUMENT)
            .bind(document.owner_id)
            .bind(document.name.trim())
            .bind(document.url.trim())
            .bind(document.storage_provider())
            .bind(document.page_count)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn owner_of(&self, document_id: DocumentId) -> Result<UserId, AppError> {
        sqlx::query_scalar::<_, i64>(SELECT_DOCUMENT_OWNER)
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("document {document_id}")))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Document>, AppError> {
        let rows = sqlx::query_as::<_, DocumentRow>(SELECT_DOCUMENTS_BY_OWNER)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn delete_document(&self, document_id: DocumentId) -> Result<(), AppError> {
        let result = sqlx::query(DELETE_DOCUMENT)
            .bind(document_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("document {document_id}")));
        }
        Ok(())
    }
}
