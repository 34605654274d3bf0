/* src/format/toml.rs */

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{FmtError, Format};

/// TOML format using `toml`.
pub struct Toml;

impl Format for Toml {
	fn extensions(&self) -> &'static [&'static str] {
		&["toml"]
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FmtError> {
		toml::to_string_pretty(value)
			.map(String::into_bytes)
			.map_err(|e| FmtError::Encode(e.to_string()))
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		let s = std::str::from_utf8(input).map_err(|e| FmtError::Decode(e.to_string()))?;
		toml::from_str(s).map_err(|e| FmtError::Decode(e.to_string()))
	}
}
