use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[derive(Clone, Debug)]
struct Entry {
	value:      String,
	expires_at: Option<Instant>,
}

impl Entry {
	fn is_live(&self, now: Instant) -> bool {
		self.expires_at.is_none_or(|at| now < at)
	}
}

/// Expired entries are swept once every this many writes
const SWEEP_INTERVAL: u64 = 64;

#[derive(Debug, Default)]
struct Entries {
	map:    HashMap<String, Entry>,
	writes: u64,
}

/// In-process key-value store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	entries: Arc<Mutex<Entries>>,
}

impl MemoryStore {
	pub(crate) fn get(&self, key: &str) -> Option<String> {
		let mut guard = self.entries.lock();
		let entries = &mut guard.map;

		match entries.get(key) {
			Some(entry) if entry.is_live(Instant::now()) => {
				Some(entry.value.clone())
			},
			Some(_) => {
				entries.remove(key);
				None
			},
			None => None,
		}
	}

	pub(crate) fn set(&self, key: &str, value: &str, expiry: Option<u64>) {
		let expires_at =
			expiry.map(|secs| Instant::now() + Duration::from_secs(secs));

		let mut entries = self.entries.lock();

		entries.writes += 1;
		if entries.writes.is_multiple_of(SWEEP_INTERVAL) {
			let now = Instant::now();
			entries.map.retain(|_, entry| entry.is_live(now));
		}

		entries
			.map
			.insert(key.to_string(), Entry { value: value.to_string(), expires_at });
	}

	pub(crate) fn delete(&self, key: &str) { self.entries.lock().map.remove(key); }
}
