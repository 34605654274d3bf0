/* src/signal/worker.rs */

use std::path::PathBuf;

use notify::event::{ModifyKind, RenameMode};

use super::{Config, Event, EventKind};
use crate::store::Suppression;

/// Decides which raw notifications become [`Event`]s.
///
/// Runs on the notifier's own thread, so it must stay cheap and non-blocking.
pub(crate) struct EventFilter {
	pub(crate) target: PathBuf,
	pub(crate) config: Config,
	pub(crate) suppression: Option<Suppression>,
}

impl EventFilter {
	pub(crate) fn classify(&self, event: notify::Event) -> Option<Event> {
		use notify::EventKind as NK;
		let kind = match event.kind {
			NK::Create(_) => EventKind::Create,
			NK::Modify(ModifyKind::Name(RenameMode::From)) => EventKind::Remove,
			NK::Modify(ModifyKind::Name(RenameMode::To)) => EventKind::Create,
			NK::Modify(_) => EventKind::Modify,
			NK::Remove(_) => EventKind::Remove,
			_ => return None,
		};

		if !event.paths.iter().any(|p| p == &self.target) {
			return None;
		}

		if self.suppression.as_ref().is_some_and(Suppression::is_raised) {
			tracing::trace!(path = ?self.target, ?kind, "ignoring self-initiated write");
			return None;
		}

		if !self.config.allows(kind) {
			return None;
		}

		Some(Event {
			path: self.target.clone(),
			kind,
		})
	}
}
