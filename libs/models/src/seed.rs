//! Initial store contents loaded from JSON files

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use common::Error;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use store::{CollectionKey, Record, Store};

use crate::{
	AcademicCalendarEntry,
	Booking,
	Equipment,
	Room,
	Rule,
	User,
	UserRole,
};

/// Fills empty collections from the seed files in a directory
pub struct Seeder<'s> {
	dir:   PathBuf,
	store: &'s Store,
}

impl<'s> Seeder<'s> {
	pub fn new(dir: impl AsRef<Path>, store: &'s Store) -> Self {
		Self { dir: dir.as_ref().to_path_buf(), store }
	}

	/// Read a seed file, a missing file yields [`None`]
	fn read_file_records<T>(&self, filename: &str) -> Result<Option<Vec<T>>, Error>
	where
		T: DeserializeOwned,
	{
		let path = self.dir.join(filename);

		if !path.exists() {
			warn!("seed file {} does not exist, skipping", path.display());

			return Ok(None);
		}

		let s = std::fs::read_to_string(&path)?;
		let records = serde_json::from_str(&s)?;

		Ok(Some(records))
	}

	/// Load a seed file into its collection
	///
	/// Existing collections are left alone unless `force` is set, returns
	/// whether the collection was written
	async fn populate_with<S, R, F>(
		&self,
		filename: &str,
		force: bool,
		convert: F,
	) -> Result<bool, Error>
	where
		S: DeserializeOwned,
		R: Record,
		F: Fn(S) -> Result<R, Error>,
	{
		if !force && self.store.has_collection(R::KEY).await? {
			debug!("collection {} already exists, not seeding", R::KEY);

			return Ok(false);
		}

		let Some(seeds) = self.read_file_records::<S>(filename)? else {
			return Ok(false);
		};

		let records = seeds.into_iter().map(convert).collect::<Result<Vec<R>, _>>()?;

		self.store.save(&records).await?;

		info!("seeded {} from {filename} ({} records)", R::KEY, records.len());

		Ok(true)
	}

	/// Seed every collection, returns the keys that were written
	///
	/// With `force` unset only missing collections are seeded
	#[instrument(skip(self), fields(dir = %self.dir.display()))]
	pub async fn populate(&self, force: bool) -> Result<Vec<CollectionKey>, Error> {
		let _guard = self.store.write().await;

		let mut seeded = vec![];

		if self.populate_with("users.json", force, SeedUser::into_user).await? {
			seeded.push(CollectionKey::Users);
		}
		if self.populate_with("rooms.json", force, Ok::<Room, _>).await? {
			seeded.push(CollectionKey::Rooms);
		}
		if self.populate_with("equipment.json", force, Ok::<Equipment, _>).await? {
			seeded.push(CollectionKey::Equipment);
		}
		if self.populate_with("bookings.json", force, Ok::<Booking, _>).await? {
			seeded.push(CollectionKey::Bookings);
		}
		if self.populate_with("rules.json", force, Ok::<Rule, _>).await? {
			seeded.push(CollectionKey::Rules);
		}
		if self
			.populate_with("calendar.json", force, Ok::<AcademicCalendarEntry, _>)
			.await?
		{
			seeded.push(CollectionKey::Calendar);
		}

		Ok(seeded)
	}
}

/// A seed account carrying its plaintext password
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
	pub id:         String,
	pub name:       String,
	pub email:      String,
	#[serde(default)]
	pub role:       UserRole,
	#[serde(default = "active")]
	pub is_active:  bool,
	pub created_at: DateTime<Utc>,
	pub password:   String,
}

fn active() -> bool { true }

impl SeedUser {
	/// Hash the password of this [`SeedUser`] into a stored [`User`]
	pub fn into_user(self) -> Result<User, Error> {
		let password_hash = User::hash_password(&self.password)?;

		Ok(User {
			id: self.id,
			name: self.name,
			email: self.email,
			role: self.role,
			is_active: self.is_active,
			created_at: self.created_at,
			password_hash,
		})
	}
}
