//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub mod entities;
mod post_repository;
mod user_repository;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

pub use post_repository::{PostRepository, PostStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use post_repository::delete_posts_by_author;
pub(crate) use user_repository::delete_user_row;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use post_repository::MockPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

const LIKE_ESCAPE: char = '\\';

/// Case-insensitive substring match on a text column.
///
/// The needle is matched literally: `%`, `_` and the escape character are
/// escaped before building the LIKE pattern.
pub(crate) fn contains_ignore_case<C: IntoColumnRef>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(like_pattern(needle)).escape(LIKE_ESCAPE))
}

fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
