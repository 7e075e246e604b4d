//! Key-value storage for whole JSON documents
//!
//! Every entity collection lives under a single key as one JSON array and is
//! read and rewritten in full on each access. Sessions share the same store
//! under their own expiring keys.

#[macro_use]
extern crate tracing;

use std::sync::Arc;

use common::{Error, InternalServerError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// The keys under which entity collections are stored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKey {
	Users,
	Rooms,
	Equipment,
	Bookings,
	Deactivations,
	Rules,
	Calendar,
}

impl CollectionKey {
	pub const ALL: [Self; 7] = [
		Self::Users,
		Self::Rooms,
		Self::Equipment,
		Self::Bookings,
		Self::Deactivations,
		Self::Rules,
		Self::Calendar,
	];

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Users => "campus_users",
			Self::Rooms => "campus_rooms",
			Self::Equipment => "campus_equipment",
			Self::Bookings => "campus_bookings",
			Self::Deactivations => "campus_deactivations",
			Self::Rules => "campus_rules",
			Self::Calendar => "campus_calendar",
		}
	}
}

impl std::fmt::Display for CollectionKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A type that is stored as an element of a single collection document
pub trait Record: Clone + DeserializeOwned + Serialize + Send + Sync {
	const KEY: CollectionKey;
}

#[derive(Clone, Debug)]
enum Backend {
	Memory(MemoryStore),
	Redis(RedisStore),
}

/// Handle to the key-value store
///
/// Cheap to clone, all clones share the same backend and write lock
#[derive(Clone, Debug)]
pub struct Store {
	backend:    Backend,
	write_lock: Arc<Mutex<()>>,
}

/// Held for the duration of a read-modify-write cycle
pub type WriteGuard<'s> = MutexGuard<'s, ()>;

impl Store {
	/// Create a fresh, empty in-process store
	#[must_use]
	pub fn memory() -> Self {
		Self::from_backend(Backend::Memory(MemoryStore::default()))
	}

	/// Connect to the store at the given url
	///
	/// `memory://` selects an in-process store, `redis://` and `rediss://`
	/// connect to a redis server
	#[instrument]
	pub async fn connect(url: &str) -> Result<Self, Error> {
		if url.starts_with("memory:") {
			info!("using in-process memory store");

			return Ok(Self::memory());
		}

		if url.starts_with("redis://") || url.starts_with("rediss://") {
			let redis = RedisStore::connect(url).await?;

			info!("connected to redis store");

			return Ok(Self::from_backend(Backend::Redis(redis)));
		}

		Err(InternalServerError::UnsupportedStoreUrl(url.to_string()).into())
	}

	fn from_backend(backend: Backend) -> Self {
		Self { backend, write_lock: Arc::new(Mutex::new(())) }
	}

	/// Acquire the store-wide write lock
	///
	/// Every mutation of a collection must load, modify and save it while
	/// holding this guard
	pub async fn write(&self) -> WriteGuard<'_> { self.write_lock.lock().await }

	/// Get the raw value stored under a key
	pub async fn get(&self, key: &str) -> Result<Option<String>, Error> {
		match &self.backend {
			Backend::Memory(m) => Ok(m.get(key)),
			Backend::Redis(r) => r.get(key).await,
		}
	}

	/// Store a raw value under a key
	pub async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
		match &self.backend {
			Backend::Memory(m) => {
				m.set(key, value, None);
				Ok(())
			},
			Backend::Redis(r) => r.set(key, value).await,
		}
	}

	/// Store a raw value under a key that expires after `seconds`
	pub async fn set_with_expiry(
		&self,
		key: &str,
		value: &str,
		seconds: u64,
	) -> Result<(), Error> {
		match &self.backend {
			Backend::Memory(m) => {
				m.set(key, value, Some(seconds));
				Ok(())
			},
			Backend::Redis(r) => r.set_ex(key, value, seconds).await,
		}
	}

	/// Remove a key
	pub async fn delete(&self, key: &str) -> Result<(), Error> {
		match &self.backend {
			Backend::Memory(m) => {
				m.delete(key);
				Ok(())
			},
			Backend::Redis(r) => r.delete(key).await,
		}
	}

	/// Check if a key currently holds a value
	pub async fn exists(&self, key: &str) -> Result<bool, Error> {
		match &self.backend {
			Backend::Memory(m) => Ok(m.get(key).is_some()),
			Backend::Redis(r) => r.exists(key).await,
		}
	}

	/// Check if a collection document has been written yet
	pub async fn has_collection(&self, key: CollectionKey) -> Result<bool, Error> {
		self.exists(key.as_str()).await
	}

	/// Load an entire collection, a missing document is an empty collection
	#[instrument(skip(self), fields(key = %R::KEY))]
	pub async fn load<R: Record>(&self) -> Result<Vec<R>, Error> {
		let Some(document) = self.get(R::KEY.as_str()).await? else {
			debug!("collection {} is empty", R::KEY);

			return Ok(vec![]);
		};

		let records = serde_json::from_str(&document)?;

		Ok(records)
	}

	/// Replace an entire collection
	#[instrument(skip_all, fields(key = %R::KEY, len = records.len()))]
	pub async fn save<R: Record>(&self, records: &[R]) -> Result<(), Error> {
		let document = serde_json::to_string(records)?;

		self.set(R::KEY.as_str(), &document).await?;

		debug!("wrote {} records to {}", records.len(), R::KEY);

		Ok(())
	}
}
