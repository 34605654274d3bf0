/* src/store/source/mod.rs */

use std::path::Path;

use async_trait::async_trait;

use super::StoreError;

mod file;
mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

/// Narrow filesystem seam the [`Store`](super::Store) reads and writes through.
#[async_trait]
pub trait Source: Send + Sync {
	/// Check if a file is present at the given path.
	async fn exists(&self, path: &Path) -> bool;

	/// Read the whole file.
	async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

	/// Replace the whole file with `bytes`.
	async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;
}
