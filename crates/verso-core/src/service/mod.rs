//! Application services composing the domain with the ports.
//!
//! Each mutating operation follows load-modify-save over the whole
//! aggregate; reads resolve category/author references for display.

mod categories;
mod posts;

pub use categories::CategoryService;
pub use posts::{PostPage, PostService, PostView};
