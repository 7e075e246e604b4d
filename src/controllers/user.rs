//! Admin controllers for managing [`User`] accounts

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::Error;
use models::{
	NewDeactivation,
	NewUser,
	User,
	UserDeactivation,
	UserFilter,
	UserStats,
	UserUpdate,
};
use store::Store;
use validator::Validate;

use crate::schemas::user::{
	CreateUserRequest,
	DeactivateUserRequest,
	DeactivateUserResponse,
	UpdateUserRequest,
	UserResponse,
};
use crate::session::AdminSession;

#[instrument(skip(store))]
pub(crate) async fn get_users(
	State(store): State<Store>,
	Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<UserResponse>>, Error> {
	UserDeactivation::reactivate_due(Utc::now(), &store).await?;

	let users = User::get_all(&store).await?;
	let users = filter.apply(users).into_iter().map(Into::into).collect();

	Ok(Json(users))
}

#[instrument(skip(store))]
pub(crate) async fn get_user_stats(
	State(store): State<Store>,
) -> Result<Json<UserStats>, Error> {
	UserDeactivation::reactivate_due(Utc::now(), &store).await?;

	let users = User::get_all(&store).await?;

	Ok(Json(UserStats::from(users.as_slice())))
}

#[instrument(skip(store))]
pub(crate) async fn get_user(
	State(store): State<Store>,
	Path(id): Path<String>,
) -> Result<Json<UserResponse>, Error> {
	let user = User::get_by_id(&id, &store).await?;

	Ok(Json(user.into()))
}

#[instrument(skip_all)]
pub(crate) async fn create_user(
	State(store): State<Store>,
	Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let user = NewUser::from(request).insert(Utc::now(), &store).await?;

	Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[instrument(skip(store))]
pub(crate) async fn update_user(
	State(store): State<Store>,
	Path(id): Path<String>,
	Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, Error> {
	request.validate()?;

	let user = UserUpdate::from(request).apply(&id, &store).await?;

	Ok(Json(user.into()))
}

/// Deactivate an account, temporarily when a duration is given
#[instrument(skip(store, session), fields(admin = %session.admin.id))]
pub(crate) async fn deactivate_user(
	State(store): State<Store>,
	session: AdminSession,
	Path(id): Path<String>,
	Json(request): Json<DeactivateUserRequest>,
) -> Result<Json<DeactivateUserResponse>, Error> {
	request.validate()?;

	let (user, deactivation) = NewDeactivation::from(request)
		.apply(&id, &session.admin.id, Utc::now(), &store)
		.await?;

	Ok(Json(DeactivateUserResponse { user: user.into(), deactivation }))
}

#[instrument(skip(store))]
pub(crate) async fn activate_user(
	State(store): State<Store>,
	Path(id): Path<String>,
) -> Result<Json<UserResponse>, Error> {
	let user = UserDeactivation::lift(&id, Utc::now(), &store).await?;

	Ok(Json(user.into()))
}

#[instrument(skip(store))]
pub(crate) async fn get_user_deactivations(
	State(store): State<Store>,
	Path(id): Path<String>,
) -> Result<Json<Vec<UserDeactivation>>, Error> {
	// 404 for unknown users
	User::get_by_id(&id, &store).await?;

	let deactivations = UserDeactivation::for_user(&id, &store).await?;

	Ok(Json(deactivations))
}
