//! Like and save toggles. Any authenticated user may react to any existing
//! post; visibility gates reads only, so a `friends` post that answers 403 on
//! `GET` still accepts reactions.

use super::parse_id;
use crate::domain::ReactionKind;
use crate::presentation::auth::Principal;
use crate::presentation::dto::{LikeResponse, SaveResponse};
use crate::presentation::error::ApiResult;
use crate::{AppState, SERVICE_NAME};
use axum::extract::{Path, State};
use axum::Json;
use cs_core::metrics;

const ACTION_ADD: &str = "add";
const ACTION_REMOVE: &str = "remove";

pub async fn like_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<LikeResponse>> {
    let post_id = parse_id(&raw_id)?;
    let like_count = state.likes.like_post(principal.user_id, post_id).await?;
    metrics::inc_reaction_toggle(SERVICE_NAME, ReactionKind::Like.as_str(), ACTION_ADD);
    Ok(Json(LikeResponse {
        post_id,
        liked: true,
        like_count,
    }))
}

pub async fn unlike_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<LikeResponse>> {
    let post_id = parse_id(&raw_id)?;
    let like_count = state.likes.unlike_post(principal.user_id, post_id).await?;
    metrics::inc_reaction_toggle(SERVICE_NAME, ReactionKind::Like.as_str(), ACTION_REMOVE);
    Ok(Json(LikeResponse {
        post_id,
        liked: false,
        like_count,
    }))
}

pub async fn save_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<SaveResponse>> {
    let post_id = parse_id(&raw_id)?;
    let save_count = state.saves.save_post(principal.user_id, post_id).await?;
    metrics::inc_reaction_toggle(SERVICE_NAME, ReactionKind::Save.as_str(), ACTION_ADD);
    Ok(Json(SaveResponse {
        post_id,
        saved: true,
        save_count,
    }))
}

pub async fn unsave_post(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<SaveResponse>> {
    let post_id = parse_id(&raw_id)?;
    let save_count = state.saves.unsave_post(principal.user_id, post_id).await?;
    metrics::inc_reaction_toggle(SERVICE_NAME, ReactionKind::Save.as_str(), ACTION_REMOVE);
    Ok(Json(SaveResponse {
        post_id,
        saved: false,
        save_count,
    }))
}
