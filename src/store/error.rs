/* src/store/error.rs */

use std::path::PathBuf;

use crate::format::FmtError;

/// Errors returned by [`Store`](super::Store) and its [`Source`](super::Source).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// The backing file does not exist.
	#[error("file not found: {}", .0.display())]
	NotFound(PathBuf),

	/// Reading the backing file failed.
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Writing the backing file failed.
	#[error("failed to write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Encoding or decoding the content failed.
	#[error(transparent)]
	Format(#[from] FmtError),
}
