//! User sessions and access tokens

use axum::RequestPartsExt;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use common::{Error, InternalServerError};
use models::User;
use serde::{Deserialize, Serialize};
use store::Store;
use time::Duration;
use uuid::Uuid;

use crate::{AppState, SessionId};

/// A session for any signed in user
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
	pub id:   Uuid,
	pub data: SessionData,
}

/// A session for any admin user, carrying the current state of that admin
///
/// ```rs
/// pub async fn foo_route(session: AdminSession) -> impl IntoResponse {
///     println!("{:?}", session.admin.name);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AdminSession {
	pub id:    Uuid,
	pub data:  SessionData,
	pub admin: User,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionData {
	pub user_id: String,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session_id = match parts.extensions.get::<SessionId>() {
			Some(id) => **id,
			None => {
				return Err(InternalServerError::SessionWithoutAuthError.into());
			},
		};

		let State(store) = parts
			.extract_with_state::<State<Store>, AppState>(state)
			.await
			.map_err(|_| Error::InternalServerError)?;

		let session = Self::get(session_id, &store).await?;

		let Some(session) = session else {
			return Err(Error::Infallible(
				"failed to retrieve session despite passing auth middleware"
					.to_string(),
			));
		};

		Ok(session)
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			parts.extract_with_state::<Session, AppState>(state).await?;

		// Roles can change during a session, trust the stored user
		let admin = User::get_by_id(&session.data.user_id, &state.store).await?;

		if !admin.is_admin() {
			return Err(Error::Forbidden);
		}

		let admin_session = Self { id: session.id, data: session.data, admin };

		Ok(admin_session)
	}
}

impl Session {
	fn key(id: Uuid) -> String { format!("session:{}", id.simple()) }

	/// Create and store a new [`Session`] for a given [`User`]
	#[instrument(skip(store, user), fields(user = %user.id))]
	pub async fn create(
		lifetime: Duration,
		user: &User,
		store: &Store,
	) -> Result<Self, Error> {
		let id = Uuid::new_v4();

		let data = SessionData { user_id: user.id.clone() };

		// Add a buffer of 10 seconds to ensure the cached session doesn't
		// expire before the session cookie does
		let expiry = lifetime.whole_seconds().unsigned_abs() + 10;

		let serialized = serde_json::to_string(&data)?;

		store.set_with_expiry(&Self::key(id), &serialized, expiry).await?;

		debug!("stored session {id} for user {}", user.id);

		Ok(Self { id, data })
	}

	/// Get a session from the store
	#[instrument(skip(store))]
	pub async fn get(id: Uuid, store: &Store) -> Result<Option<Self>, Error> {
		let Some(data) = store.get(&Self::key(id)).await? else {
			return Ok(None);
		};

		let data: SessionData = serde_json::from_str(&data)?;

		Ok(Some(Self { id, data }))
	}

	/// Remove a session given its id
	#[instrument(skip(store))]
	pub async fn delete(id: Uuid, store: &Store) -> Result<(), Error> {
		store.delete(&Self::key(id)).await
	}

	/// Convert this [`Session`] into an access token cookie
	#[must_use]
	pub fn to_access_token_cookie(
		&self,
		name: String,
		lifetime: Duration,
		secure: bool,
	) -> Cookie<'static> {
		Cookie::build((name, self.id.to_string()))
			.http_only(true)
			.max_age(lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into()
	}
}
