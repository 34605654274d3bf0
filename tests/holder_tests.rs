/* tests/holder_tests.rs */

use std::sync::Arc;

use livecfg::holder::{Holder, Origin};

#[derive(Debug, Clone, PartialEq)]
struct Limits {
	max_conn: u32,
	name: String,
}

fn limits() -> Limits {
	Limits {
		max_conn: 10,
		name: "edge".to_string(),
	}
}

#[test]
fn test_holder_get_and_replace() {
	let holder = Holder::new(limits(), Origin::Seeded);
	assert_eq!(holder.get().max_conn, 10);
	assert_eq!(holder.meta().version, 1);
	assert_eq!(holder.meta().origin, Origin::Seeded);

	let snapshot = holder.get();
	holder.replace(
		Limits {
			max_conn: 20,
			..limits()
		},
		Origin::Reloaded,
	);

	// Old snapshots are unaffected by replacement.
	assert_eq!(snapshot.max_conn, 10);
	assert_eq!(holder.get().max_conn, 20);
	assert_eq!(holder.meta().version, 2);
	assert_eq!(holder.meta().origin, Origin::Reloaded);
}

#[test]
fn test_holder_modify_copies_on_write() {
	let holder = Holder::new(limits(), Origin::Loaded);
	let before = holder.get();

	let after = holder.modify(|l| l.max_conn += 5, Origin::Set);

	assert_eq!(before.max_conn, 10);
	assert_eq!(after.max_conn, 15);
	assert_eq!(after.name, "edge");
	assert!(!Arc::ptr_eq(&before, &after));
	assert_eq!(holder.entry().meta.version, 2);
}

#[test]
fn test_holder_concurrent_readers() {
	let holder = Arc::new(Holder::new(limits(), Origin::Seeded));

	let readers: Vec<_> = (0..4)
		.map(|_| {
			let holder = holder.clone();
			std::thread::spawn(move || {
				for _ in 0..1000 {
					let v = holder.get();
					assert!(v.max_conn == 10 || v.max_conn == 99);
				}
			})
		})
		.collect();

	holder.replace(
		Limits {
			max_conn: 99,
			..limits()
		},
		Origin::Updated,
	);

	for r in readers {
		r.join().unwrap();
	}
	assert_eq!(holder.get().max_conn, 99);
}

#[cfg(feature = "events")]
#[tokio::test]
async fn test_holder_broadcasts_replacements() {
	use livecfg::holder::HoldEvent;

	let holder = Holder::new(limits(), Origin::Seeded);
	let mut rx = holder.subscribe();

	holder.modify(|l| l.max_conn = 1, Origin::Set);

	match rx.recv().await.unwrap() {
		HoldEvent::Updated { old, new, meta } => {
			assert_eq!(old.max_conn, 10);
			assert_eq!(new.max_conn, 1);
			assert_eq!(meta.version, 2);
			assert_eq!(meta.origin, Origin::Set);
		}
	}
}
