//! User directory adapters.

mod memory;

pub use memory::InMemoryUserDirectory;
