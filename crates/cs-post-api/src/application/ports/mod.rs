pub mod friendship;
pub mod repositories;

pub use friendship::{FriendshipOracle, NoFriendships};
pub use repositories::{
    DocumentStore, LikeRepository, PostRepository, SaveRepository, StorageHealth,
};
