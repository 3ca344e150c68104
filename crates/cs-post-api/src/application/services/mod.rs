pub mod access_policy;
pub mod document_service;
pub mod like_service;
pub mod post_service;
pub mod save_service;

pub use access_policy::{ViewDecision, VisibilityPolicy};
pub use document_service::DocumentService;
pub use like_service::LikeService;
pub use post_service::{PostAccess, PostService};
pub use save_service::SaveService;
