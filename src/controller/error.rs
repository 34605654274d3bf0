/* src/controller/error.rs */

use std::path::PathBuf;

use thiserror::Error;

use super::ValidationError;
use crate::format::FmtError;
#[cfg(feature = "signal")]
use crate::signal::SignalError;
use crate::store::StoreError;

/// Errors that can occur in the Live controller.
#[derive(Debug, Error)]
pub enum LiveError {
	/// The file could not be seeded or loaded during construction.
	#[error("Setup failed for {}: {source}", path.display())]
	Setup {
		path: PathBuf,
		#[source]
		source: StoreError,
	},

	#[error("Store error: {0}")]
	Store(#[from] StoreError),

	#[error("Format error: {0}")]
	Format(#[from] FmtError),

	#[cfg(feature = "signal")]
	#[error("Signal error: {0}")]
	Signal(#[from] SignalError),

	#[error("Validation failed: {0}")]
	Validation(#[from] ValidationError),

	#[error("Watching requires the `signal` feature")]
	WatchUnavailable,

	#[error("Builder error: {0}")]
	Builder(String),
}
