use chrono::{DateTime, TimeDelta, Utc};
use common::Error;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use store::{CollectionKey, Record, Store};

use crate::user::find_mut;
use crate::User;

/// A record of an account being deactivated by an admin
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeactivation {
	pub user_id:        String,
	pub reason:         String,
	pub deactivated_by: String,
	pub deactivated_at: DateTime<Utc>,
	pub duration_days:  Option<u32>,
	pub reactivate_at:  Option<DateTime<Utc>>,
	pub lifted_at:      Option<DateTime<Utc>>,
}

impl Record for UserDeactivation {
	const KEY: CollectionKey = CollectionKey::Deactivations;
}

impl UserDeactivation {
	/// Whether this deactivation is still in effect
	#[must_use]
	pub fn is_open(&self) -> bool { self.lifted_at.is_none() }

	/// Whether this deactivation should be lifted automatically at `now`
	#[must_use]
	pub fn is_due(&self, now: DateTime<Utc>) -> bool {
		self.is_open() && self.reactivate_at.is_some_and(|at| at <= now)
	}

	/// Get every deactivation ever recorded for a user, newest first
	#[instrument(skip(store))]
	pub async fn for_user(
		user_id: &str,
		store: &Store,
	) -> Result<Vec<Self>, Error> {
		let mut records: Vec<Self> = store
			.load::<Self>()
			.await?
			.into_iter()
			.filter(|d| d.user_id == user_id)
			.collect();

		records.sort_by(|a, b| b.deactivated_at.cmp(&a.deactivated_at));

		Ok(records)
	}

	/// Reactivate a user, lifting any open deactivation
	#[instrument(skip(store))]
	pub async fn lift(
		user_id: &str,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<User, Error> {
		let _guard = store.write().await;

		let mut users: Vec<User> = store.load().await?;
		let mut deactivations: Vec<Self> = store.load().await?;

		let user = find_mut(&mut users, user_id)?;
		user.is_active = true;
		let user = user.clone();

		for d in deactivations
			.iter_mut()
			.filter(|d| d.user_id == user_id && d.is_open())
		{
			d.lifted_at = Some(now);
		}

		store.save(&users).await?;
		store.save(&deactivations).await?;

		info!("reactivated user {user_id}");

		Ok(user)
	}

	/// Lift every deactivation whose reactivation date has passed
	///
	/// Returns the ids of the reactivated users
	#[instrument(skip(store))]
	pub async fn reactivate_due(
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<Vec<String>, Error> {
		let _guard = store.write().await;

		let mut deactivations: Vec<Self> = store.load().await?;

		let mut due = vec![];
		for d in deactivations.iter_mut().filter(|d| d.is_due(now)) {
			d.lifted_at = Some(now);
			due.push(d.user_id.clone());
		}

		if due.is_empty() {
			return Ok(due);
		}

		let mut users: Vec<User> = store.load().await?;
		for user in users.iter_mut().filter(|u| due.contains(&u.id)) {
			user.is_active = true;
		}

		store.save(&users).await?;
		store.save(&deactivations).await?;

		info!("automatically reactivated {} users", due.len());

		Ok(due)
	}
}

#[derive(Clone, Debug)]
pub struct NewDeactivation {
	pub reason:        String,
	pub duration_days: Option<u32>,
}

impl NewDeactivation {
	/// When a deactivation starting at `now` ends, if ever
	///
	/// # Errors
	/// Fails when the end lies past the last representable instant
	pub fn reactivate_at(
		&self,
		now: DateTime<Utc>,
	) -> Result<Option<DateTime<Utc>>, Error> {
		self.duration_days
			.map(|days| {
				now.checked_add_signed(TimeDelta::days(i64::from(days)))
					.ok_or_else(|| {
						Error::ValidationError(format!(
							"a deactivation of {days} days is out of range"
						))
					})
			})
			.transpose()
	}

	/// Deactivate the user with the given id
	#[instrument(skip(store))]
	pub async fn apply(
		self,
		user_id: &str,
		deactivated_by: &str,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<(User, UserDeactivation), Error> {
		if self.reason.trim().is_empty() {
			return Err(Error::ValidationError(
				"a deactivation reason is required".to_string(),
			));
		}

		if user_id == deactivated_by {
			return Err(Error::Forbidden);
		}

		let reactivate_at = self.reactivate_at(now)?;

		let _guard = store.write().await;

		let mut users: Vec<User> = store.load().await?;
		let mut deactivations: Vec<UserDeactivation> = store.load().await?;

		let user = find_mut(&mut users, user_id)?;

		if !user.is_active {
			return Err(Error::ValidationError(
				"user is already deactivated".to_string(),
			));
		}

		user.is_active = false;
		let user = user.clone();

		let deactivation = UserDeactivation {
			user_id:        user_id.to_string(),
			reactivate_at,
			reason:         self.reason,
			deactivated_by: deactivated_by.to_string(),
			deactivated_at: now,
			duration_days:  self.duration_days,
			lifted_at:      None,
		};

		deactivations.push(deactivation.clone());

		store.save(&users).await?;
		store.save(&deactivations).await?;

		info!(
			"deactivated user {user_id} until {:?}",
			deactivation.reactivate_at
		);

		Ok((user, deactivation))
	}
}
