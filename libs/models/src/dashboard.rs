use common::Error;
use serde::{Deserialize, Serialize};
use store::Store;

use crate::{Booking, BookingStatus, Equipment, Room, User};

/// Headline numbers for the admin dashboard
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	pub total_users:       usize,
	pub total_bookings:    usize,
	pub total_items:       usize,
	pub pending_approvals: usize,
	pub approved_bookings: usize,
	pub rejected_bookings: usize,
}

impl DashboardStats {
	#[must_use]
	pub fn compute(
		users: &[User],
		rooms: &[Room],
		equipment: &[Equipment],
		bookings: &[Booking],
	) -> Self {
		let count = |status| bookings.iter().filter(|b| b.status == status).count();

		Self {
			total_users:       users.len(),
			total_bookings:    bookings.len(),
			total_items:       rooms.len() + equipment.len(),
			pending_approvals: count(BookingStatus::Pending),
			approved_bookings: count(BookingStatus::Approved),
			rejected_bookings: count(BookingStatus::Rejected),
		}
	}

	/// Compute the [`DashboardStats`] over the current store contents
	#[instrument(skip(store))]
	pub async fn collect(store: &Store) -> Result<Self, Error> {
		let users: Vec<User> = store.load().await?;
		let rooms: Vec<Room> = store.load().await?;
		let equipment: Vec<Equipment> = store.load().await?;
		let bookings: Vec<Booking> = store.load().await?;

		Ok(Self::compute(&users, &rooms, &equipment, &bookings))
	}
}
