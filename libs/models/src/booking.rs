use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use common::{CreateBookingError, Error};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use store::{CollectionKey, Record, Store};

use crate::availability::refresh_equipment;
use crate::{BookingAction, Equipment, Room, User, matches_search, new_id};

/// Minimum length of a booking purpose, in characters
pub const MIN_PURPOSE_LENGTH: usize = 10;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
	Room,
	Equipment,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
	Pending,
	Approved,
	Rejected,
	Active,
	Completed,
	Cancelled,
}

impl BookingStatus {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
			Self::Active => "active",
			Self::Completed => "completed",
			Self::Cancelled => "cancelled",
		}
	}

	/// Whether a booking in this status holds on to its item
	#[must_use]
	pub const fn is_reserving(self) -> bool {
		matches!(self, Self::Approved | Self::Active)
	}
}

impl std::fmt::Display for BookingStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// One entry in the status history of a booking
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusEvent {
	pub status:    BookingStatus,
	pub timestamp: DateTime<Utc>,
	pub by:        Option<String>,
	pub notes:     Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
	pub id:               String,
	pub user_id:          String,
	pub user_name:        String,
	#[serde(rename = "type")]
	pub kind:             BookingKind,
	pub item_id:          String,
	pub item_name:        String,
	pub start_date:       DateTime<Utc>,
	pub end_date:         DateTime<Utc>,
	pub purpose:          String,
	pub notes:            Option<String>,
	pub status:           BookingStatus,
	pub approved_by:      Option<String>,
	pub approved_at:      Option<DateTime<Utc>>,
	pub rejection_reason: Option<String>,
	pub created_at:       DateTime<Utc>,
	#[serde(default)]
	pub timeline:         Vec<BookingStatusEvent>,
}

impl Record for Booking {
	const KEY: CollectionKey = CollectionKey::Bookings;
}

impl Booking {
	/// Whether `instant` lies within this booking, both ends inclusive
	#[must_use]
	pub fn contains(&self, instant: DateTime<Utc>) -> bool {
		self.start_date <= instant && instant <= self.end_date
	}

	/// Whether this booking overlaps the half-open range `[from, until)`
	#[must_use]
	pub fn overlaps(&self, from: DateTime<Utc>, until: DateTime<Utc>) -> bool {
		self.start_date < until && self.end_date > from
	}

	/// Get all [`Booking`]s, newest first
	#[instrument(skip(store))]
	pub async fn get_all(store: &Store) -> Result<Vec<Self>, Error> {
		let mut bookings: Vec<Self> = store.load().await?;

		bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Ok(bookings)
	}

	/// Get a [`Booking`] given its id
	#[instrument(skip(store))]
	pub async fn get_by_id(id: &str, store: &Store) -> Result<Self, Error> {
		store
			.load::<Self>()
			.await?
			.into_iter()
			.find(|b| b.id == id)
			.ok_or_else(|| Error::NotFound(format!("booking {id}")))
	}

	/// Get all [`Booking`]s made by a user, newest first
	#[instrument(skip(store))]
	pub async fn for_user(
		user_id: &str,
		store: &Store,
	) -> Result<Vec<Self>, Error> {
		let bookings = Self::get_all(store)
			.await?
			.into_iter()
			.filter(|b| b.user_id == user_id)
			.collect();

		Ok(bookings)
	}

	/// Move a [`Booking`] to a new status on behalf of an admin
	///
	/// Equipment availability is recomputed after every transition of an
	/// equipment booking
	#[instrument(skip(store, actor), fields(actor = %actor.id))]
	pub async fn transition(
		id: &str,
		action: BookingAction,
		actor: &User,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Self, Error> {
		let guard = store.write().await;

		let mut bookings: Vec<Self> = store.load().await?;

		let booking = bookings
			.iter_mut()
			.find(|b| b.id == id)
			.ok_or_else(|| Error::NotFound(format!("booking {id}")))?;

		booking.apply(action, &actor.id, now)?;
		let booking = booking.clone();

		store.save(&bookings).await?;

		if booking.kind == BookingKind::Equipment {
			refresh_equipment(now, store, &guard).await?;
		}

		info!("booking {id} is now {}", booking.status);

		Ok(booking)
	}

	/// Reserving bookings of one item that overlap the given UTC day
	///
	/// # Errors
	/// Fails for the last representable date, which has no end
	pub fn schedule(
		bookings: &[Self],
		item_id: &str,
		date: NaiveDate,
	) -> Result<Vec<Self>, Error> {
		let next = date.succ_opt().ok_or_else(|| {
			Error::ValidationError(format!("{date} is out of range"))
		})?;

		let from = date.and_time(NaiveTime::MIN).and_utc();
		let until = next.and_time(NaiveTime::MIN).and_utc();

		Ok(bookings
			.iter()
			.filter(|b| {
				b.item_id == item_id
					&& b.status.is_reserving()
					&& b.overlaps(from, until)
			})
			.cloned()
			.collect())
	}
}

#[derive(Clone, Debug)]
pub struct NewBooking {
	pub kind:       BookingKind,
	pub item_id:    String,
	pub start_date: DateTime<Utc>,
	pub end_date:   DateTime<Utc>,
	pub purpose:    String,
	pub notes:      Option<String>,
}

impl NewBooking {
	/// Submit this [`NewBooking`] as a pending request made by `user`
	#[instrument(skip(store, user), fields(user = %user.id))]
	pub async fn insert(
		self,
		user: &User,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Booking, Error> {
		if self.end_date <= self.start_date {
			return Err(CreateBookingError::InvalidRange {
				start: self.start_date,
				end:   self.end_date,
			}
			.into());
		}

		if self.purpose.trim().chars().count() < MIN_PURPOSE_LENGTH {
			return Err(Error::ValidationError(format!(
				"purpose must be at least {MIN_PURPOSE_LENGTH} characters"
			)));
		}

		let _guard = store.write().await;

		let item_name = match self.kind {
			BookingKind::Room => {
				store
					.load::<Room>()
					.await?
					.into_iter()
					.find(|r| r.id == self.item_id)
					.map(|r| r.name)
					.ok_or_else(|| {
						Error::NotFound(format!("room {}", self.item_id))
					})?
			},
			BookingKind::Equipment => {
				store
					.load::<Equipment>()
					.await?
					.into_iter()
					.find(|e| e.id == self.item_id)
					.map(|e| e.name)
					.ok_or_else(|| {
						Error::NotFound(format!("equipment {}", self.item_id))
					})?
			},
		};

		let notes = self.notes.filter(|n| !n.trim().is_empty());

		let booking = Booking {
			id: new_id("booking"),
			user_id: user.id.clone(),
			user_name: user.name.clone(),
			kind: self.kind,
			item_id: self.item_id,
			item_name,
			start_date: self.start_date,
			end_date: self.end_date,
			purpose: self.purpose,
			notes: notes.clone(),
			status: BookingStatus::Pending,
			approved_by: None,
			approved_at: None,
			rejection_reason: None,
			created_at: now,
			timeline: vec![BookingStatusEvent {
				status:    BookingStatus::Pending,
				timestamp: now,
				by:        Some(user.id.clone()),
				notes,
			}],
		};

		let mut bookings: Vec<Booking> = store.load().await?;
		bookings.insert(0, booking.clone());
		store.save(&bookings).await?;

		info!("user {} requested booking {}", user.id, booking.id);

		Ok(booking)
	}
}

/// Groups of statuses shown together
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingTab {
	Pending,
	Active,
	History,
}

impl BookingTab {
	#[must_use]
	pub const fn contains(self, status: BookingStatus) -> bool {
		match self {
			Self::Pending => matches!(status, BookingStatus::Pending),
			Self::Active => status.is_reserving(),
			Self::History => {
				matches!(
					status,
					BookingStatus::Completed
						| BookingStatus::Rejected
						| BookingStatus::Cancelled
				)
			},
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub status:  Option<BookingStatus>,
	#[serde(rename = "type")]
	pub kind:    Option<BookingKind>,
	pub item_id: Option<String>,
	pub user_id: Option<String>,
	pub search:  Option<String>,
	pub tab:     Option<BookingTab>,
}

impl BookingFilter {
	#[must_use]
	pub fn matches(&self, booking: &Booking) -> bool {
		self.status.is_none_or(|s| s == booking.status)
			&& self.kind.is_none_or(|k| k == booking.kind)
			&& self.item_id.as_ref().is_none_or(|i| *i == booking.item_id)
			&& self.user_id.as_ref().is_none_or(|u| *u == booking.user_id)
			&& self.tab.is_none_or(|t| t.contains(booking.status))
			&& matches_search(
				&[&booking.item_name, &booking.purpose],
				self.search.as_deref(),
			)
	}

	#[must_use]
	pub fn apply(&self, bookings: Vec<Booking>) -> Vec<Booking> {
		bookings.into_iter().filter(|b| self.matches(b)).collect()
	}
}

/// Number of bookings per status group
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCounts {
	pub total:     usize,
	pub pending:   usize,
	pub active:    usize,
	pub completed: usize,
	pub rejected:  usize,
	pub cancelled: usize,
}

impl From<&[Booking]> for BookingCounts {
	fn from(bookings: &[Booking]) -> Self {
		let mut counts = Self { total: bookings.len(), ..Default::default() };

		for booking in bookings {
			match booking.status {
				BookingStatus::Pending => counts.pending += 1,
				BookingStatus::Approved | BookingStatus::Active => {
					counts.active += 1;
				},
				BookingStatus::Completed => counts.completed += 1,
				BookingStatus::Rejected => counts.rejected += 1,
				BookingStatus::Cancelled => counts.cancelled += 1,
			}
		}

		counts
	}
}
