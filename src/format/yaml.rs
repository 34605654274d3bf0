/* src/format/yaml.rs */

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{FmtError, Format};

/// YAML format using `serde_yaml`.
pub struct Yaml;

impl Format for Yaml {
	fn extensions(&self) -> &'static [&'static str] {
		&["yaml", "yml"]
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FmtError> {
		serde_yaml::to_string(value)
			.map(String::into_bytes)
			.map_err(|e| FmtError::Encode(e.to_string()))
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		serde_yaml::from_slice(input).map_err(|e| FmtError::Decode(e.to_string()))
	}
}
