/* src/controller/options.rs */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::format::FileType;
#[cfg(feature = "signal")]
use crate::signal::Config as WatcherConfig;

/// Default pause before rewriting a rejected file.
pub const DEFAULT_REVERT_GRACE: Duration = Duration::from_millis(100);

/// What to do when an externally edited file fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
	/// Rewrite the file with the last known-good value; memory keeps that value.
	#[default]
	Revert,
	/// Keep the invalid value in memory, leave the file alone, log a warning.
	Warn,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown validation policy: {0} (expected `revert` or `warn`)")]
pub struct ParsePolicyError(pub String);

impl FromStr for ValidationPolicy {
	type Err = ParsePolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"revert" => Ok(Self::Revert),
			"warn" => Ok(Self::Warn),
			_ => Err(ParsePolicyError(s.to_string())),
		}
	}
}

/// Construction options for [`Live`](super::Live).
///
/// The file lives at `root_dir/name.<format extension>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveOptions {
	pub format: FileType,
	pub root_dir: PathBuf,
	pub name: String,
	/// Reload automatically when the file changes on disk.
	pub watch: bool,
	pub policy: ValidationPolicy,
	/// Pause before a revert, in milliseconds.
	pub revert_grace_ms: u64,
	#[cfg(feature = "signal")]
	pub watcher: WatcherConfig,
}

impl LiveOptions {
	pub fn revert_grace(&self) -> Duration {
		Duration::from_millis(self.revert_grace_ms)
	}
}

impl Default for LiveOptions {
	fn default() -> Self {
		Self {
			format: FileType::default(),
			root_dir: PathBuf::from("."),
			name: "config".to_string(),
			watch: false,
			policy: ValidationPolicy::default(),
			revert_grace_ms: DEFAULT_REVERT_GRACE.as_millis() as u64,
			#[cfg(feature = "signal")]
			watcher: WatcherConfig::default(),
		}
	}
}
