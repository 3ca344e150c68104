use super::{json_body, parse_id};
use crate::domain::NewDocument;
use crate::presentation::auth::Principal;
use crate::presentation::dto::{CreateDocumentRequest, DocumentResponse};
use crate::presentation::error::ApiResult;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_document(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let document = state
        .documents
        .create_document(NewDocument {
            owner_id: principal.user_id,
            name: payload.document_name,
            url: payload.document_url,
            storage_provider: payload.storage_provider,
            page_count: payload.page_count,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

pub async fn list_documents(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<DocumentResponse>>> {
    let documents = state.documents.list_by_owner(principal.user_id).await?;
    Ok(Json(
        documents.into_iter().map(DocumentResponse::from).collect(),
    ))
}

pub async fn delete_document(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let document_id = parse_id(&raw_id)?;
    state
        .documents
        .delete_document(principal.user_id, document_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
