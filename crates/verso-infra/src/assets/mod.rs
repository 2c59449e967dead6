//! Binary asset store adapters.

mod fs;

pub use fs::FsAssetStore;
