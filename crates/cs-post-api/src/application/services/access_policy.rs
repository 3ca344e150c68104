use crate::application::ports::FriendshipOracle;
use crate::domain::{PostView, UserId, Visibility};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Outcome of a read attempt. Lookup failures are returned as `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDecision {
    Owner,
    Public,
    FriendsGranted,
    FriendsOnly,
    Denied,
    NotFound,
}

impl ViewDecision {
    pub fn is_allowed(self) -> bool {
        matches!(
            self,
            ViewDecision::Owner | ViewDecision::Public | ViewDecision::FriendsGranted
        )
    }

    /// Stable reason code for clients.
    pub fn reason(self) -> &'static str {
        match self {
            ViewDecision::Owner => "owner",
            ViewDecision::Public => "public",
            ViewDecision::FriendsGranted => "friends",
            ViewDecision::FriendsOnly => "friends_only",
            ViewDecision::Denied => "denied",
            ViewDecision::NotFound => "not_found",
        }
    }
}

/// Read and mutation rules for posts.
#[derive(Clone)]
pub struct VisibilityPolicy {
    friendship: Arc<dyn FriendshipOracle>,
}

impl VisibilityPolicy {
    pub fn new(friendship: Arc<dyn FriendshipOracle>) -> Self {
        Self { friendship }
    }

    pub async fn decide(
        &self,
        viewer_id: UserId,
        post: Option<&PostView>,
    ) -> Result<ViewDecision, AppError> {
        let Some(post) = post else {
            return Ok(ViewDecision::NotFound);
        };

        // the author always sees their own post, whatever its visibility
        if post.is_authored_by(viewer_id) {
            return Ok(ViewDecision::Owner);
        }

        match post.visibility() {
            Visibility::Public => Ok(ViewDecision::Public),
            Visibility::Friends => {
                if self
                    .friendship
                    .are_friends(viewer_id, post.author_id)
                    .await?
                {
                    Ok(ViewDecision::FriendsGranted)
                } else {
                    Ok(ViewDecision::FriendsOnly)
                }
            }
            Visibility::Other(_) => Ok(ViewDecision::Denied),
        }
    }

    pub fn may_mutate(owner_id: UserId, viewer_id: UserId) -> bool {
        owner_id == viewer_id
    }
}
