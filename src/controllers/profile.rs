//! Account settings of the signed in user

use axum::Json;
use axum::extract::State;
use axum::response::NoContent;
use common::Error;
use models::User;
use store::Store;
use validator::Validate;

use crate::schemas::profile::{ChangePasswordRequest, UpdateProfileRequest};
use crate::schemas::user::UserResponse;
use crate::session::Session;

#[instrument(skip(store))]
pub(crate) async fn update_current_user(
	State(store): State<Store>,
	session: Session,
	Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, Error> {
	request.validate()?;

	let user = User::change_email(&session.data.user_id, request.email, &store)
		.await?;

	Ok(Json(user.into()))
}

#[instrument(skip_all, fields(user = %session.data.user_id))]
pub(crate) async fn change_password(
	State(store): State<Store>,
	session: Session,
	Json(request): Json<ChangePasswordRequest>,
) -> Result<NoContent, Error> {
	request.validate()?;

	User::change_password(
		&session.data.user_id,
		&request.current_password,
		&request.new_password,
		&store,
	)
	.await?;

	Ok(NoContent)
}
