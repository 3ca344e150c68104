use crate::domain::UserId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Answers whether two users may see each other's friends-only posts.
#[async_trait]
pub trait FriendshipOracle: Send + Sync {
    async fn are_friends(&self, user_a: UserId, user_b: UserId) -> Result<bool, AppError>;
}

/// Stand-in oracle that never grants friendship, so friends-only posts stay
/// visible to their author alone.
// TODO: back this with accepted rows from the friend-request tables once the
// social service persists them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFriendships;

#[async_trait]
impl FriendshipOracle for NoFriendships {
    async fn are_friends(&self, _user_a: UserId, _user_b: UserId) -> Result<bool, AppError> {
        Ok(false)
    }
}
