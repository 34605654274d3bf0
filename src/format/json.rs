/* src/format/json.rs */

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use super::{FmtError, Format};

/// JSON format using `serde_json`, pretty-printed with four-space indentation.
pub struct Json;

impl Format for Json {
	fn extensions(&self) -> &'static [&'static str] {
		&["json"]
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FmtError> {
		let mut out = Vec::new();
		let formatter = PrettyFormatter::with_indent(b"    ");
		let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
		value
			.serialize(&mut ser)
			.map_err(|e| FmtError::Encode(e.to_string()))?;
		Ok(out)
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		serde_json::from_slice(input).map_err(|e| FmtError::Decode(e.to_string()))
	}
}
