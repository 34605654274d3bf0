/* src/holder/mod.rs */

mod cell;
mod entry;
#[cfg(feature = "events")]
mod event;
mod meta;

pub use cell::{DEFAULT_EVENT_CAPACITY, Holder};
pub use entry::Entry;
#[cfg(feature = "events")]
pub use event::HoldEvent;
pub use meta::{Meta, Origin};
