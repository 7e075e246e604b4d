use common::Error;
use serde::{Deserialize, Serialize};
use store::{CollectionKey, Record, Store};

use crate::{matches_search, new_id};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Occupation label of a room, set by admins
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
	#[default]
	Available,
	Booked,
	InUse,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
	pub id:         String,
	pub name:       String,
	pub capacity:   u32,
	pub facilities: Vec<String>,
	pub status:     RoomStatus,
	pub image_url:  String,
	pub building:   String,
	pub floor:      i32,
}

impl Record for Room {
	const KEY: CollectionKey = CollectionKey::Rooms;
}

impl Room {
	/// Get all [`Room`]s
	#[instrument(skip(store))]
	pub async fn get_all(store: &Store) -> Result<Vec<Self>, Error> {
		store.load().await
	}

	/// Get a [`Room`] given its id
	#[instrument(skip(store))]
	pub async fn get_by_id(id: &str, store: &Store) -> Result<Self, Error> {
		Self::get_all(store)
			.await?
			.into_iter()
			.find(|r| r.id == id)
			.ok_or_else(|| Error::NotFound(format!("room {id}")))
	}

	/// All distinct buildings rooms are located in, sorted
	#[must_use]
	pub fn buildings(rooms: &[Self]) -> Vec<String> {
		let mut buildings: Vec<String> =
			rooms.iter().map(|r| r.building.clone()).collect();

		buildings.sort();
		buildings.dedup();

		buildings
	}
}

#[derive(Clone, Debug)]
pub struct NewRoom {
	pub name:       String,
	pub capacity:   u32,
	pub facilities: Vec<String>,
	pub status:     Option<RoomStatus>,
	pub image_url:  Option<String>,
	pub building:   String,
	pub floor:      i32,
}

impl NewRoom {
	/// Insert this [`NewRoom`]
	#[instrument(skip(store))]
	pub async fn insert(self, store: &Store) -> Result<Room, Error> {
		let room = Room {
			id:         new_id("room"),
			name:       self.name,
			capacity:   self.capacity,
			facilities: self.facilities,
			status:     self.status.unwrap_or_default(),
			image_url:  self
				.image_url
				.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
			building:   self.building,
			floor:      self.floor,
		};

		let _guard = store.write().await;

		let mut rooms: Vec<Room> = store.load().await?;
		rooms.push(room.clone());
		store.save(&rooms).await?;

		info!("created room {}", room.id);

		Ok(room)
	}
}

#[derive(Clone, Debug, Default)]
pub struct RoomUpdate {
	pub name:       Option<String>,
	pub capacity:   Option<u32>,
	pub facilities: Option<Vec<String>>,
	pub status:     Option<RoomStatus>,
	pub image_url:  Option<String>,
	pub building:   Option<String>,
	pub floor:      Option<i32>,
}

impl RoomUpdate {
	/// Apply this update to the [`Room`] with the given id
	#[instrument(skip(store))]
	pub async fn apply(self, id: &str, store: &Store) -> Result<Room, Error> {
		let _guard = store.write().await;

		let mut rooms: Vec<Room> = store.load().await?;

		let room = rooms
			.iter_mut()
			.find(|r| r.id == id)
			.ok_or_else(|| Error::NotFound(format!("room {id}")))?;

		if let Some(name) = self.name {
			room.name = name;
		}
		if let Some(capacity) = self.capacity {
			room.capacity = capacity;
		}
		if let Some(facilities) = self.facilities {
			room.facilities = facilities;
		}
		if let Some(status) = self.status {
			room.status = status;
		}
		if let Some(image_url) = self.image_url {
			room.image_url = image_url;
		}
		if let Some(building) = self.building {
			room.building = building;
		}
		if let Some(floor) = self.floor {
			room.floor = floor;
		}

		let room = room.clone();

		store.save(&rooms).await?;

		info!("updated room {id}");

		Ok(room)
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
	pub search:   Option<String>,
	pub status:   Option<RoomStatus>,
	pub building: Option<String>,
}

impl RoomFilter {
	#[must_use]
	pub fn matches(&self, room: &Room) -> bool {
		self.status.is_none_or(|s| s == room.status)
			&& self.building.as_ref().is_none_or(|b| *b == room.building)
			&& matches_search(&[&room.name], self.search.as_deref())
	}

	#[must_use]
	pub fn apply(&self, rooms: Vec<Room>) -> Vec<Room> {
		rooms.into_iter().filter(|r| self.matches(r)).collect()
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStats {
	pub total:     usize,
	pub available: usize,
	pub booked:    usize,
	pub in_use:    usize,
}

impl From<&[Room]> for RoomStats {
	fn from(rooms: &[Room]) -> Self {
		let count = |status| rooms.iter().filter(|r| r.status == status).count();

		Self {
			total:     rooms.len(),
			available: count(RoomStatus::Available),
			booked:    count(RoomStatus::Booked),
			in_use:    count(RoomStatus::InUse),
		}
	}
}
