#![allow(dead_code)]

use utoipa::OpenApi;

use crate::presentation::dto::{
    CreateDocumentRequest, CreatePostRequest, DocumentResponse, LikeResponse, PostCountResponse,
    PostIdResponse, PostResponse, SaveResponse, UpdatePostRequest,
};
use crate::presentation::error::ErrorResponse;
use crate::HealthStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz_doc,
        metrics_doc,
        create_post_doc,
        list_posts_doc,
        get_post_doc,
        update_post_doc,
        delete_post_doc,
        like_post_doc,
        unlike_post_doc,
        save_post_doc,
        unsave_post_doc,
        post_count_doc,
        create_document_doc,
        list_documents_doc,
        delete_document_doc
    ),
    components(schemas(
        HealthStatus,
        ErrorResponse,
        CreatePostRequest,
        UpdatePostRequest,
        PostIdResponse,
        PostResponse,
        PostCountResponse,
        LikeResponse,
        SaveResponse,
        CreateDocumentRequest,
        DocumentResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "posts", description = "Posts, tags and visibility"),
        (name = "reactions", description = "Likes and saves"),
        (name = "documents", description = "Uploaded document metadata")
    )
)]
pub struct PostApiDoc;

struct BearerAuth;

impl utoipa::Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn document() -> utoipa::openapi::OpenApi {
    PostApiDoc::openapi()
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, body = HealthStatus), (status = 503, body = HealthStatus))
)]
fn healthz_doc() {}

#[utoipa::path(
    get,
    path = "/metrics",
    responses((status = 200, content_type = "text/plain", body = String))
)]
fn metrics_doc() {}

#[utoipa::path(
    post,
    path = "/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, body = PostIdResponse),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
fn create_post_doc() {}

#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "posts",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [PostResponse]),
        (status = 401, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
fn list_posts_doc() {}

#[utoipa::path(
    get,
    path = "/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = PostResponse),
        (status = 400, body = ErrorResponse),
        (status = 403, description = "FRIENDS_ONLY or ACCESS_DENIED", body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    )
)]
fn get_post_doc() {}

#[utoipa::path(
    put,
    path = "/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, body = PostIdResponse),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
fn update_post_doc() {}

#[utoipa::path(
    delete,
    path = "/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
fn delete_post_doc() {}

#[utoipa::path(
    post,
    path = "/v1/posts/{id}/like",
    tag = "reactions",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses((status = 200, body = LikeResponse), (status = 404, body = ErrorResponse))
)]
fn like_post_doc() {}

#[utoipa::path(
    delete,
    path = "/v1/posts/{id}/like",
    tag = "reactions",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses((status = 200, body = LikeResponse), (status = 404, body = ErrorResponse))
)]
fn unlike_post_doc() {}

#[utoipa::path(
    post,
    path = "/v1/posts/{id}/save",
    tag = "reactions",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses((status = 200, body = SaveResponse), (status = 404, body = ErrorResponse))
)]
fn save_post_doc() {}

#[utoipa::path(
    delete,
    path = "/v1/posts/{id}/save",
    tag = "reactions",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer" = [])),
    responses((status = 200, body = SaveResponse), (status = 404, body = ErrorResponse))
)]
fn unsave_post_doc() {}

#[utoipa::path(
    get,
    path = "/v1/users/{id}/post-count",
    tag = "posts",
    params(("id" = i64, Path, description = "User id")),
    security(("bearer" = [])),
    responses((status = 200, body = PostCountResponse), (status = 400, body = ErrorResponse))
)]
fn post_count_doc() {}

#[utoipa::path(
    post,
    path = "/v1/documents",
    tag = "documents",
    request_body = CreateDocumentRequest,
    security(("bearer" = [])),
    responses((status = 201, body = DocumentResponse), (status = 400, body = ErrorResponse))
)]
fn create_document_doc() {}

#[utoipa::path(
    get,
    path = "/v1/documents",
    tag = "documents",
    security(("bearer" = [])),
    responses((status = 200, body = [DocumentResponse]))
)]
fn list_documents_doc() {}

#[utoipa::path(
    delete,
    path = "/v1/documents/{id}",
    tag = "documents",
    params(("id" = i64, Path, description = "Document id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    )
)]
fn delete_document_doc() {}
