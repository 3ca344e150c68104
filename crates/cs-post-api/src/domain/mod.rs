pub mod document;
pub mod post;
pub mod reaction;
pub mod tag;
pub mod visibility;

pub use document::{Document, NewDocument};
pub use post::{NewPost, PostStats, PostUpdate, PostView};
pub use reaction::ReactionKind;
pub use tag::{normalize_tags, CanonicalTagNormalizer, TagNormalizer};
pub use visibility::Visibility;

pub type UserId = i64;
pub type PostId = i64;
pub type DocumentId = i64;
pub type SummaryId = i64;
