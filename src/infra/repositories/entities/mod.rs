//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod post;
pub mod post_tag;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use post::{ActiveModel as PostActiveModel, Entity as PostEntity, Model as PostModel};
#[allow(unused_imports)]
pub use post_tag::{ActiveModel as PostTagActiveModel, Entity as PostTagEntity, Model as PostTagModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
