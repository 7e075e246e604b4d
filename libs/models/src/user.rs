use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use common::{Error, LoginError};
use serde::{Deserialize, Serialize};
use store::{CollectionKey, Record, Store};

use crate::{matches_search, new_id};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
	#[default]
	User,
	Admin,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id:            String,
	pub name:          String,
	pub email:         String,
	pub role:          UserRole,
	pub is_active:     bool,
	pub created_at:    DateTime<Utc>,
	pub password_hash: String,
}

impl Record for User {
	const KEY: CollectionKey = CollectionKey::Users;
}

impl User {
	#[must_use]
	pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }

	/// Hash a plaintext password into a PHC string
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hash =
			Argon2::default().hash_password(password.as_bytes(), &salt)?;

		Ok(hash.to_string())
	}

	/// Check a plaintext password against the stored hash
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let hash = PasswordHash::new(&self.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &hash)?;

		Ok(())
	}

	/// Get all [`User`]s
	#[instrument(skip(store))]
	pub async fn get_all(store: &Store) -> Result<Vec<Self>, Error> {
		store.load().await
	}

	/// Get a [`User`] given its id
	#[instrument(skip(store))]
	pub async fn get_by_id(id: &str, store: &Store) -> Result<Self, Error> {
		Self::get_all(store)
			.await?
			.into_iter()
			.find(|u| u.id == id)
			.ok_or_else(|| Error::NotFound(format!("user {id}")))
	}

	/// Get the [`User`] with the given email and role
	#[instrument(skip(store))]
	pub async fn get_by_email_and_role(
		email: &str,
		role: UserRole,
		store: &Store,
	) -> Result<Self, Error> {
		Self::get_all(store)
			.await?
			.into_iter()
			.find(|u| u.email.eq_ignore_ascii_case(email) && u.role == role)
			.ok_or_else(|| LoginError::UnknownAccount(email.to_string()).into())
	}

	/// Change the email address of a [`User`]
	#[instrument(skip(store))]
	pub async fn change_email(
		id: &str,
		email: String,
		store: &Store,
	) -> Result<Self, Error> {
		let _guard = store.write().await;

		let mut users: Vec<Self> = store.load().await?;

		ensure_unique_email(&users, &email, Some(id))?;

		let user = find_mut(&mut users, id)?;
		user.email = email;
		let user = user.clone();

		store.save(&users).await?;

		info!("changed email of user {id}");

		Ok(user)
	}

	/// Change the password of a [`User`] after verifying the current one
	#[instrument(skip_all, fields(id = id))]
	pub async fn change_password(
		id: &str,
		current_password: &str,
		new_password: &str,
		store: &Store,
	) -> Result<Self, Error> {
		Self::get_by_id(id, store).await?.verify_password(current_password)?;

		let password_hash = Self::hash_password(new_password)?;

		let _guard = store.write().await;

		let mut users: Vec<Self> = store.load().await?;

		let user = find_mut(&mut users, id)?;
		user.password_hash = password_hash;
		let user = user.clone();

		store.save(&users).await?;

		info!("changed password of user {id}");

		Ok(user)
	}
}

/// Find a mutable reference to a user inside a loaded collection
pub(crate) fn find_mut<'u>(
	users: &'u mut [User],
	id: &str,
) -> Result<&'u mut User, Error> {
	users
		.iter_mut()
		.find(|u| u.id == id)
		.ok_or_else(|| Error::NotFound(format!("user {id}")))
}

fn ensure_unique_email(
	users: &[User],
	email: &str,
	except: Option<&str>,
) -> Result<(), Error> {
	let taken = users.iter().any(|u| {
		u.email.eq_ignore_ascii_case(email) && Some(u.id.as_str()) != except
	});

	if taken {
		return Err(Error::Duplicate("email is already in use".to_string()));
	}

	Ok(())
}

#[derive(Clone, Debug)]
pub struct NewUser {
	pub name:     String,
	pub email:    String,
	pub role:     UserRole,
	pub password: String,
}

impl NewUser {
	/// Insert this [`NewUser`] as an active account
	#[instrument(skip_all)]
	pub async fn insert(
		self,
		now: DateTime<Utc>,
		store: &Store,
	) -> Result<User, Error> {
		let password_hash = User::hash_password(&self.password)?;

		let _guard = store.write().await;

		let mut users: Vec<User> = store.load().await?;

		ensure_unique_email(&users, &self.email, None)?;

		let user = User {
			id: new_id("user"),
			name: self.name,
			email: self.email,
			role: self.role,
			is_active: true,
			created_at: now,
			password_hash,
		};

		users.push(user.clone());
		store.save(&users).await?;

		info!("created user {} with role {:?}", user.id, user.role);

		Ok(user)
	}
}

#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
	pub name:  Option<String>,
	pub email: Option<String>,
	pub role:  Option<UserRole>,
}

impl UserUpdate {
	/// Apply this update to the [`User`] with the given id
	#[instrument(skip(store))]
	pub async fn apply(self, id: &str, store: &Store) -> Result<User, Error> {
		let _guard = store.write().await;

		let mut users: Vec<User> = store.load().await?;

		if let Some(email) = &self.email {
			ensure_unique_email(&users, email, Some(id))?;
		}

		let user = find_mut(&mut users, id)?;

		if let Some(name) = self.name {
			user.name = name;
		}
		if let Some(email) = self.email {
			user.email = email;
		}
		if let Some(role) = self.role {
			user.role = role;
		}

		let user = user.clone();

		store.save(&users).await?;

		info!("updated user {id}");

		Ok(user)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
	Active,
	Inactive,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
	pub search: Option<String>,
	pub status: Option<UserStatus>,
	pub role:   Option<UserRole>,
}

impl UserFilter {
	#[must_use]
	pub fn matches(&self, user: &User) -> bool {
		let status_matches = match self.status {
			Some(UserStatus::Active) => user.is_active,
			Some(UserStatus::Inactive) => !user.is_active,
			None => true,
		};

		status_matches
			&& self.role.is_none_or(|r| r == user.role)
			&& matches_search(&[&user.name, &user.email], self.search.as_deref())
	}

	#[must_use]
	pub fn apply(&self, users: Vec<User>) -> Vec<User> {
		users.into_iter().filter(|u| self.matches(u)).collect()
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
	pub total:    usize,
	pub active:   usize,
	pub inactive: usize,
}

impl From<&[User]> for UserStats {
	fn from(users: &[User]) -> Self {
		let active = users.iter().filter(|u| u.is_active).count();

		Self { total: users.len(), active, inactive: users.len() - active }
	}
}
