/* src/holder/meta.rs */

use std::time::Instant;

/// What caused the live value to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
	/// Written to a fresh file as the initial value.
	Seeded,
	/// Read from the file by an explicit or initial load.
	Loaded,
	/// Read from the file after an external edit.
	Reloaded,
	/// Accepted through a validated update.
	Updated,
	/// Assigned directly by the application, unvalidated.
	Set,
}

/// Metadata associated with the live value.
#[derive(Debug, Clone)]
pub struct Meta {
	/// What produced the current value.
	pub origin: Origin,
	/// Timestamp when the value was installed.
	pub updated_at: Instant,
	/// Version number, auto-incremented on each change.
	pub version: u64,
}
