/* src/store/mod.rs */

//!
//! File-backed persistence for a single configuration value.
//!
//! A [`Store`] owns one path, one encoder and one lock. Every read or write of
//! the file goes through that lock, so a load never observes a half-finished
//! save from the same process.
//!
//! Silent saves also remember the bytes they wrote. Change notifications can
//! arrive well after the write returns, so [`Store::load_external`] compares
//! the file against those bytes to recognise a late echo of our own write.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::format::{AnyFormat, FileType, FmtError, Format};

mod error;
mod silent;
pub mod source;

pub use error::StoreError;
pub use silent::Suppression;
pub use source::{FileSource, MemorySource, Source};

/// Persists a value to `root_dir/name.ext` in one format.
pub struct Store {
	path: PathBuf,
	format: AnyFormat,
	source: Arc<dyn Source>,
	/// Bytes of the last silent write, cleared once the file holds anything else.
	lock: Mutex<Option<Vec<u8>>>,
	suppression: Suppression,
}

impl Store {
	/// Creates a store backed by the real filesystem.
	pub fn new(
		root_dir: impl AsRef<Path>,
		name: &str,
		file_type: FileType,
	) -> Result<Self, FmtError> {
		Self::with_source(root_dir, name, file_type, Arc::new(FileSource::new()))
	}

	/// Creates a store reading and writing through a custom [`Source`].
	pub fn with_source(
		root_dir: impl AsRef<Path>,
		name: &str,
		file_type: FileType,
		source: Arc<dyn Source>,
	) -> Result<Self, FmtError> {
		let format = AnyFormat::try_from(file_type)?;
		let path = root_dir
			.as_ref()
			.join(format!("{}.{}", name, file_type.extension()));

		Ok(Self {
			path,
			format,
			source,
			lock: Mutex::new(None),
			suppression: Suppression::new(),
		})
	}

	/// Path of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Encoder used for this file.
	pub fn format(&self) -> AnyFormat {
		self.format
	}

	/// Handle on the flag raised during [`save_silent`](Self::save_silent).
	pub fn suppression(&self) -> Suppression {
		self.suppression.clone()
	}

	/// Returns true if the backing file is present.
	pub async fn exists(&self) -> bool {
		self.source.exists(&self.path).await
	}

	/// Reads and decodes the backing file.
	pub async fn load<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
		let _lock = self.lock.lock().await;
		let bytes = self.source.read(&self.path).await?;
		Ok(self.format.decode(&bytes)?)
	}

	/// Like [`load`](Self::load), but returns `None` while the file still holds
	/// exactly what the last [`save_silent`](Self::save_silent) wrote.
	pub async fn load_external<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
		let mut last_silent = self.lock.lock().await;
		let bytes = self.source.read(&self.path).await?;
		if last_silent.as_deref() == Some(bytes.as_slice()) {
			return Ok(None);
		}
		*last_silent = None;
		Ok(Some(self.format.decode(&bytes)?))
	}

	/// Encodes the value and overwrites the backing file.
	pub async fn save<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StoreError> {
		let mut last_silent = self.lock.lock().await;
		*last_silent = None;
		let bytes = self.format.encode(value)?;
		self.source.write(&self.path, &bytes).await
	}

	/// Same as [`save`](Self::save), but watchers sharing this store's
	/// [`Suppression`] ignore the write, and [`load_external`](Self::load_external)
	/// skips the content it leaves behind.
	///
	/// The flag is lowered before this returns, on success and on error.
	pub async fn save_silent<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StoreError> {
		let mut last_silent = self.lock.lock().await;
		let _quiet = self.suppression.raise();
		*last_silent = None;
		let bytes = self.format.encode(value)?;
		self.source.write(&self.path, &bytes).await?;
		*last_silent = Some(bytes);
		Ok(())
	}

	/// Encodes the value without touching the file.
	pub fn to_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, StoreError> {
		let bytes = self.format.encode(value)?;
		String::from_utf8(bytes).map_err(|e| StoreError::Format(FmtError::Encode(e.to_string())))
	}
}

impl std::fmt::Debug for Store {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Store")
			.field("path", &self.path)
			.field("format", &self.format)
			.field("suppressed", &self.suppression.is_raised())
			.finish_non_exhaustive()
	}
}
