use chrono::{DateTime, Utc};
use common::Error;
use serde::{Deserialize, Serialize};
use store::{CollectionKey, Record, Store};

use crate::availability::refresh_equipment;
use crate::room::PLACEHOLDER_IMAGE;
use crate::{matches_search, new_id};

/// Availability label of an equipment item, always derived from the current
/// bookings
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
	#[default]
	Available,
	Booked,
	InUse,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
	pub id:          String,
	pub name:        String,
	pub category:    String,
	pub quantity:    u32,
	pub available:   u32,
	pub status:      EquipmentStatus,
	/// Set by an admin, independent of the derived status
	#[serde(default)]
	pub maintenance: bool,
	pub image_url:   String,
	pub description: String,
}

impl Record for Equipment {
	const KEY: CollectionKey = CollectionKey::Equipment;
}

impl Equipment {
	/// Get all [`Equipment`] as last stored, without recomputing availability
	#[instrument(skip(store))]
	pub async fn get_all(store: &Store) -> Result<Vec<Self>, Error> {
		store.load().await
	}

	/// Get all [`Equipment`] with availability recomputed for `now`
	#[instrument(skip(store))]
	pub async fn get_all_current(
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Vec<Self>, Error> {
		let guard = store.write().await;

		refresh_equipment(now, store, &guard).await
	}

	/// Get an [`Equipment`] item as last stored
	#[instrument(skip(store))]
	pub async fn get_by_id(id: &str, store: &Store) -> Result<Self, Error> {
		Self::get_all(store)
			.await?
			.into_iter()
			.find(|e| e.id == id)
			.ok_or_else(|| Error::NotFound(format!("equipment {id}")))
	}

	/// Get an [`Equipment`] item with availability recomputed for `now`
	#[instrument(skip(store))]
	pub async fn get_current(
		id: &str,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Self, Error> {
		Self::get_all_current(now, store)
			.await?
			.into_iter()
			.find(|e| e.id == id)
			.ok_or_else(|| Error::NotFound(format!("equipment {id}")))
	}

	/// All distinct equipment categories, sorted
	#[must_use]
	pub fn categories(equipment: &[Self]) -> Vec<String> {
		let mut categories: Vec<String> =
			equipment.iter().map(|e| e.category.clone()).collect();

		categories.sort();
		categories.dedup();

		categories
	}
}

#[derive(Clone, Debug)]
pub struct NewEquipment {
	pub name:        String,
	pub category:    String,
	pub quantity:    u32,
	pub maintenance: bool,
	pub image_url:   Option<String>,
	pub description: String,
}

impl NewEquipment {
	/// Insert this [`NewEquipment`] and recompute availability
	#[instrument(skip(store))]
	pub async fn insert(
		self,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Equipment, Error> {
		let id = new_id("eq");

		let item = Equipment {
			id:          id.clone(),
			name:        self.name,
			category:    self.category,
			quantity:    self.quantity,
			available:   self.quantity,
			status:      EquipmentStatus::Available,
			maintenance: self.maintenance,
			image_url:   self
				.image_url
				.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
			description: self.description,
		};

		let guard = store.write().await;

		let mut equipment: Vec<Equipment> = store.load().await?;
		equipment.push(item);
		store.save(&equipment).await?;

		let item = refresh_equipment(now, store, &guard)
			.await?
			.into_iter()
			.find(|e| e.id == id)
			.ok_or_else(|| {
				Error::Infallible(format!("equipment {id} vanished on insert"))
			})?;

		info!("created equipment {id}");

		Ok(item)
	}
}

#[derive(Clone, Debug, Default)]
pub struct EquipmentUpdate {
	pub name:        Option<String>,
	pub category:    Option<String>,
	pub quantity:    Option<u32>,
	pub maintenance: Option<bool>,
	pub image_url:   Option<String>,
	pub description: Option<String>,
}

impl EquipmentUpdate {
	/// Apply this update to the [`Equipment`] item with the given id and
	/// recompute availability
	#[instrument(skip(store))]
	pub async fn apply(
		self,
		id: &str,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Equipment, Error> {
		let guard = store.write().await;

		let mut equipment: Vec<Equipment> = store.load().await?;

		let item = equipment
			.iter_mut()
			.find(|e| e.id == id)
			.ok_or_else(|| Error::NotFound(format!("equipment {id}")))?;

		if let Some(name) = self.name {
			item.name = name;
		}
		if let Some(category) = self.category {
			item.category = category;
		}
		if let Some(quantity) = self.quantity {
			item.quantity = quantity;
		}
		if let Some(maintenance) = self.maintenance {
			item.maintenance = maintenance;
		}
		if let Some(image_url) = self.image_url {
			item.image_url = image_url;
		}
		if let Some(description) = self.description {
			item.description = description;
		}

		store.save(&equipment).await?;

		let item = refresh_equipment(now, store, &guard)
			.await?
			.into_iter()
			.find(|e| e.id == id)
			.ok_or_else(|| {
				Error::Infallible(format!("equipment {id} vanished on update"))
			})?;

		info!("updated equipment {id}");

		Ok(item)
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentFilter {
	pub search:      Option<String>,
	pub status:      Option<EquipmentStatus>,
	pub category:    Option<String>,
	pub maintenance: Option<bool>,
}

impl EquipmentFilter {
	#[must_use]
	pub fn matches(&self, item: &Equipment) -> bool {
		self.status.is_none_or(|s| s == item.status)
			&& self.category.as_ref().is_none_or(|c| *c == item.category)
			&& self.maintenance.is_none_or(|m| m == item.maintenance)
			&& matches_search(&[&item.name], self.search.as_deref())
	}

	#[must_use]
	pub fn apply(&self, equipment: Vec<Equipment>) -> Vec<Equipment> {
		equipment.into_iter().filter(|e| self.matches(e)).collect()
	}
}

/// Unit counts summed over all equipment items
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStats {
	pub total_units:     u64,
	pub available_units: u64,
	pub booked_units:    u64,
	pub items:           usize,
}

impl From<&[Equipment]> for EquipmentStats {
	fn from(equipment: &[Equipment]) -> Self {
		let total_units = equipment.iter().map(|e| u64::from(e.quantity)).sum();
		let available_units =
			equipment.iter().map(|e| u64::from(e.available)).sum();
		let booked_units = equipment
			.iter()
			.map(|e| u64::from(e.quantity.saturating_sub(e.available)))
			.sum();

		Self { total_units, available_units, booked_units, items: equipment.len() }
	}
}
