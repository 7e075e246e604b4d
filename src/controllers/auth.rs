//! Controllers for authorization

use axum::Json;
use axum::extract::State;
use axum::response::NoContent;
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use common::{Error, LoginError};
use models::{User, UserDeactivation};
use store::Store;

use crate::Config;
use crate::schemas::auth::LoginRequest;
use crate::schemas::user::UserResponse;
use crate::session::Session;

#[instrument(skip_all)]
pub(crate) async fn login(
	State(store): State<Store>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(login_data): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<UserResponse>), Error> {
	UserDeactivation::reactivate_due(Utc::now(), &store).await?;

	let user =
		User::get_by_email_and_role(&login_data.email, login_data.role, &store)
			.await?;

	if !user.is_active {
		return Err(LoginError::Disabled.into());
	}

	user.verify_password(&login_data.password)?;

	let session =
		Session::create(config.access_cookie_lifetime, &user, &store).await?;

	let access_token = session.to_access_token_cookie(
		config.access_cookie_name,
		config.access_cookie_lifetime,
		config.production,
	);

	let jar = jar.add(access_token);

	info!("logged in user {} as {:?}", user.id, user.role);

	Ok((jar, Json(user.into())))
}

#[instrument(skip(store, config, jar))]
pub(crate) async fn logout(
	State(store): State<Store>,
	State(config): State<Config>,
	session: Session,
	jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	Session::delete(session.id, &store).await?;

	let revoked_access_token = Cookie::build((config.access_cookie_name, ""))
		.http_only(true)
		.max_age(time::Duration::hours(-1))
		.path("/")
		.same_site(SameSite::Lax)
		.secure(config.production);

	let jar = jar.add(revoked_access_token);

	info!("logged out user {}", session.data.user_id);

	Ok((jar, NoContent))
}

#[instrument(skip(store))]
pub(crate) async fn get_current_user(
	State(store): State<Store>,
	session: Session,
) -> Result<Json<UserResponse>, Error> {
	let user = User::get_by_id(&session.data.user_id, &store).await?;

	Ok(Json(user.into()))
}
