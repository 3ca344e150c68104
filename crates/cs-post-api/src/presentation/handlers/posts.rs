use super::{json_body, parse_id};
use crate::application::services::ViewDecision;
use crate::domain::{NewPost, PostId, PostUpdate, UserId};
use crate::presentation::auth::Principal;
use crate::presentation::dto::{
    CreatePostRequest, PostIdResponse, PostResponse, UpdatePostRequest,
};
use crate::presentation::error::{ApiError, ApiResult};
use crate::shared::error::AppError;
use crate::{AppState, SERVICE_NAME};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cs_core::metrics;

fn record_mutation<T>(operation: &str, result: &Result<T, AppError>) {
    let outcome = if result.is_ok() {
        metrics::RESULT_OK
    } else {
        metrics::RESULT_ERROR
    };
    metrics::inc_post_mutation(SERVICE_NAME, operation, outcome);
}

/// Owner gate for update and delete. A missing post answers like a stranger's
/// post so callers cannot probe for ids.
async fn ensure_owner(state: &AppState, post_id: PostId, user_id: UserId) -> ApiResult<()> {
    let forbidden = || ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", "not the post owner");
    match state.posts.is_owner(post_id, user_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(forbidden()),
        Err(err) if err.is_not_found() => Err(forbidden()),
        Err(err) => Err(err.into()),
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let post = NewPost {
        author_user_id: principal.user_id,
        title: payload.post_title,
        description: payload.post_description,
        visibility: payload.post_visibility,
        document_id: payload.post_document_id,
        summary_id: payload.post_summary_id,
    };

    let result = state.posts.create_post(post, &payload.tags).await;
    record_mutation("create", &result);
    let post_id = result?;
    Ok((StatusCode::CREATED, Json(PostIdResponse { post_id })))
}

pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostResponse>>> {
    let posts = state.posts.get_all_posts().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn get_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = parse_id(&raw_id)?;
    let access = state.posts.view_post(principal.user_id, post_id).await?;

    let post = match (access.decision, access.post) {
        (ViewDecision::FriendsOnly, _) => {
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                "FRIENDS_ONLY",
                "post is visible to friends only",
            ))
        }
        (ViewDecision::Denied, _) => {
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "post is not visible",
            ))
        }
        (_, Some(post)) => post,
        (_, None) => {
            return Err(ApiError::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "post not found",
            ))
        }
    };

    let is_liked = state.likes.is_post_liked(principal.user_id, post_id).await?;
    let is_saved = state.saves.is_post_saved(principal.user_id, post_id).await?;

    let mut response = PostResponse::from(post);
    response.is_liked = Some(is_liked);
    response.is_saved = Some(is_saved);
    Ok(Json(response))
}

pub async fn update_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> ApiResult<Json<PostIdResponse>> {
    let post_id = parse_id(&raw_id)?;
    let payload = json_body(payload)?;
    ensure_owner(&state, post_id, principal.user_id).await?;

    let update = PostUpdate {
        post_id,
        title: payload.post_title,
        description: payload.post_description,
        visibility: payload.post_visibility,
    };
    let result = state
        .posts
        .update_post(update, payload.tags.as_deref())
        .await;
    record_mutation("update", &result);
    result?;
    Ok(Json(PostIdResponse { post_id }))
}

pub async fn delete_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let post_id = parse_id(&raw_id)?;
    ensure_owner(&state, post_id, principal.user_id).await?;

    let result = state.posts.delete_post(post_id).await;
    record_mutation("delete", &result);
    result?;
    Ok(StatusCode::NO_CONTENT)
}
