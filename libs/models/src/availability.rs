//! Instantaneous equipment availability
//!
//! Availability is never maintained incrementally. Every read starts from the
//! full quantity of each item and subtracts one unit for every approved or
//! active booking whose range contains the current instant.

use chrono::{DateTime, Utc};
use common::Error;
use store::{Store, WriteGuard};

use crate::{Booking, BookingKind, Equipment, EquipmentStatus};

/// Recompute the available count and status label of every item
pub fn recompute_availability(
	equipment: &mut [Equipment],
	bookings: &[Booking],
	now: DateTime<Utc>,
) {
	for item in equipment.iter_mut() {
		item.available = item.quantity;
	}

	let reserving = bookings.iter().filter(|b| {
		b.kind == BookingKind::Equipment
			&& b.status.is_reserving()
			&& b.contains(now)
	});

	for booking in reserving {
		if let Some(item) = equipment.iter_mut().find(|e| e.id == booking.item_id)
		{
			item.available = item.available.saturating_sub(1);
		}
	}

	for item in equipment.iter_mut() {
		item.status = status_for(item);
	}
}

/// Map an item's counters to its status label
fn status_for(item: &Equipment) -> EquipmentStatus {
	if item.available == 0 {
		EquipmentStatus::InUse
	} else if item.available < item.quantity {
		EquipmentStatus::Booked
	} else {
		EquipmentStatus::Available
	}
}

/// Recompute and persist the availability of all equipment
///
/// The caller must hold the store write guard for the whole cycle
pub(crate) async fn refresh_equipment(
	now: DateTime<Utc>,
	store: &Store,
	_guard: &WriteGuard<'_>,
) -> Result<Vec<Equipment>, Error> {
	let mut equipment: Vec<Equipment> = store.load().await?;
	let bookings: Vec<Booking> = store.load().await?;

	recompute_availability(&mut equipment, &bookings, now);

	store.save(&equipment).await?;

	debug!("recomputed availability of {} equipment items", equipment.len());

	Ok(equipment)
}
