/* src/store/source/file.rs */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::super::StoreError;
use super::Source;

/// Permission bits applied to every written file.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// A file system source backed by `tokio::fs`.
///
/// Writes go to a hidden sibling file first and are renamed into place, so
/// readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct FileSource {
	mode: u32,
}

impl FileSource {
	pub fn new() -> Self {
		Self {
			mode: DEFAULT_FILE_MODE,
		}
	}

	/// Overrides the permission bits of written files (unix only).
	pub fn with_mode(mut self, mode: u32) -> Self {
		self.mode = mode;
		self
	}

	fn temp_path(path: &Path) -> PathBuf {
		let name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();
		path.with_file_name(format!(".{name}.tmp"))
	}

	async fn write_temp(&self, tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
		let mut file = fs::File::create(tmp).await?;
		file.write_all(bytes).await?;
		file.sync_all().await?;
		drop(file);

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			fs::set_permissions(tmp, std::fs::Permissions::from_mode(self.mode)).await?;
		}

		Ok(())
	}
}

impl Default for FileSource {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Source for FileSource {
	async fn exists(&self, path: &Path) -> bool {
		fs::try_exists(path).await.unwrap_or(false)
	}

	async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
		fs::read(path).await.map_err(|e| match e.kind() {
			std::io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
			_ => StoreError::Read {
				path: path.to_path_buf(),
				source: e,
			},
		})
	}

	async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
		let write_err = |source: std::io::Error| StoreError::Write {
			path: path.to_path_buf(),
			source,
		};

		if let Some(parent) = path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).await.map_err(write_err)?;
		}

		let tmp = Self::temp_path(path);
		if let Err(e) = self.write_temp(&tmp, bytes).await {
			let _ = fs::remove_file(&tmp).await;
			return Err(write_err(e));
		}

		fs::rename(&tmp, path).await.map_err(write_err)
	}
}
