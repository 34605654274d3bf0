/* src/format/mod.rs */

//!
//! Encoders mapping a typed value to one on-disk serialization and back.
//!
//! [`FileType`] is the format tag carried in options; [`AnyFormat`] is the
//! closed set of encoders actually compiled in.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

mod error;
pub use error::FmtError;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::Json;

#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "toml")]
pub use self::toml::Toml;

#[cfg(feature = "yaml")]
mod yaml;
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// Pure, stateless mapping between a typed value and bytes.
///
/// Encoding must be deterministic: the same value always yields the same bytes.
pub trait Format: Send + Sync {
	/// List of supported extensions. The first one names files on disk.
	fn extensions(&self) -> &'static [&'static str];

	/// Serialize the value into bytes.
	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FmtError>;

	/// Parse the raw bytes into the target type.
	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError>;

	/// The extension used when composing a file path.
	fn extension(&self) -> &'static str {
		self.extensions().first().copied().unwrap_or("conf")
	}
}

/// Format tag selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
	#[default]
	Json,
	#[serde(alias = "yml")]
	Yaml,
	Toml,
}

impl FileType {
	/// File extension for this type, without the dot.
	pub const fn extension(self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
			Self::Toml => "toml",
		}
	}
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}

impl FromStr for FileType {
	type Err = FmtError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"json" => Ok(Self::Json),
			"yaml" | "yml" => Ok(Self::Yaml),
			"toml" => Ok(Self::Toml),
			_ => Err(FmtError::Unknown(s.to_string())),
		}
	}
}

/// An enum wrapper for all compiled-in formats, enabling dynamic dispatch-like behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFormat {
	#[cfg(feature = "json")]
	Json,
	#[cfg(feature = "toml")]
	Toml,
	#[cfg(feature = "yaml")]
	Yaml,
}

impl TryFrom<FileType> for AnyFormat {
	type Error = FmtError;

	fn try_from(file_type: FileType) -> Result<Self, Self::Error> {
		match file_type {
			#[cfg(feature = "json")]
			FileType::Json => Ok(Self::Json),
			#[cfg(feature = "toml")]
			FileType::Toml => Ok(Self::Toml),
			#[cfg(feature = "yaml")]
			FileType::Yaml => Ok(Self::Yaml),
			#[allow(unreachable_patterns)]
			other => Err(FmtError::Unsupported(other.extension())),
		}
	}
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.extensions(),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}

	fn encode<T: Serialize + ?Sized>(&self, _value: &T) -> Result<Vec<u8>, FmtError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.encode(_value),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.encode(_value),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.encode(_value),
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}

	fn decode<T: DeserializeOwned>(&self, _input: &[u8]) -> Result<T, FmtError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.decode(_input),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.decode(_input),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.decode(_input),
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}
}
