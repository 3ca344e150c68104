use crate::application::ports::DocumentStore;
use crate::domain::{Document, DocumentId, NewDocument, UserId};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::info;

pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create_document(&self, document: NewDocument) -> Result<Document, AppError> {
        if document.owner_id <= 0 {
            return Err(AppError::validation("invalid owner"));
        }
        if document.name.trim().is_empty() {
            return Err(AppError::validation("document_name is required"));
        }
        if document.url.trim().is_empty() {
            return Err(AppError::validation("document_url is required"));
        }
        if document.page_count < 0 {
            return Err(AppError::validation("page_count must not be negative"));
        }

        let created = self.store.create_document(&document).await?;
        info!(
            document_id = created.document_id,
            owner_id = created.owner_id,
            "document registered"
        );
        Ok(created)
    }

    pub async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Document>, AppError> {
        self.store.list_by_owner(owner_id).await
    }

    /// Only the uploader may delete. Posts that referenced the document keep
    /// existing with the reference cleared.
    pub async fn delete_document(
        &self,
        requester_id: UserId,
        document_id: DocumentId,
    ) -> Result<(), AppError> {
        let owner_id = self.store.owner_of(document_id).await?;
        if owner_id != requester_id {
            return Err(AppError::Forbidden(format!(
                "document {document_id} belongs to another user"
            )));
        }
        self.store.delete_document(document_id).await?;
        info!(document_id, owner_id, "document deleted");
        Ok(())
    }
}
