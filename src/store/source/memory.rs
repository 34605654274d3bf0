/* src/store/source/memory.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::super::StoreError;
use super::Source;

/// A simple in-memory source useful for testing and embedded environments.
///
/// Cloning is not supported; share it behind an `Arc` to edit files from
/// "outside" while a [`Store`](crate::store::Store) uses it.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
	writes: Mutex<usize>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts data into the source.
	pub fn insert(&mut self, path: impl Into<PathBuf>, value: impl Into<Vec<u8>>) {
		self.data.get_mut().insert(path.into(), value.into());
	}

	/// Replaces a file's content without counting it as a store write.
	pub async fn put(&self, path: impl Into<PathBuf>, value: impl Into<Vec<u8>>) {
		self.data.lock().await.insert(path.into(), value.into());
	}

	/// Returns a copy of a file's content.
	pub async fn get(&self, path: &Path) -> Option<Vec<u8>> {
		self.data.lock().await.get(path).cloned()
	}

	/// Number of writes performed through [`Source::write`].
	pub async fn write_count(&self) -> usize {
		*self.writes.lock().await
	}
}

#[async_trait]
impl Source for MemorySource {
	async fn exists(&self, path: &Path) -> bool {
		self.data.lock().await.contains_key(path)
	}

	async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
		self.data
			.lock()
			.await
			.get(path)
			.cloned()
			.ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
	}

	async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
		self.data
			.lock()
			.await
			.insert(path.to_path_buf(), bytes.to_vec());
		*self.writes.lock().await += 1;
		Ok(())
	}
}
