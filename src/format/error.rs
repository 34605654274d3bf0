/* src/format/error.rs */

/// Errors raised while turning a value into bytes or back.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FmtError {
	/// The value could not be serialized.
	#[error("encode error: {0}")]
	Encode(String),

	/// The input could not be parsed into the target type.
	#[error("decode error: {0}")]
	Decode(String),

	/// The requested format was compiled out of this build.
	#[error("unsupported format: {0} (enable the `{0}` feature)")]
	Unsupported(&'static str),

	/// The format name did not match any known file type.
	#[error("unknown format: {0}")]
	Unknown(String),
}
