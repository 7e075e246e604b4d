use chrono::{DateTime, Utc};
use models::{NewDeactivation, NewUser, User, UserDeactivation, UserRole, UserUpdate};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

/// A [`User`] as exposed over the API, without credentials
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
	pub id:         String,
	pub name:       String,
	pub email:      String,
	pub role:       UserRole,
	pub is_active:  bool,
	pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
	fn from(value: User) -> Self {
		Self {
			id:         value.id,
			name:       value.name,
			email:      value.email,
			role:       value.role,
			is_active:  value.is_active,
			created_at: value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
	#[validate(length(
		min = 2,
		max = 64,
		message = "name must be between 2 and 64 characters long",
		code = "name-length"
	))]
	pub name:     String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    String,
	#[serde(default)]
	pub role:     UserRole,
	#[validate(length(
		min = 6,
		message = "password must be at least 6 characters long",
		code = "password-length"
	))]
	pub password: String,
}

impl From<CreateUserRequest> for NewUser {
	fn from(value: CreateUserRequest) -> Self {
		Self {
			name:     value.name,
			email:    value.email,
			role:     value.role,
			password: value.password,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
	#[validate(length(
		min = 2,
		max = 64,
		message = "name must be between 2 and 64 characters long",
		code = "name-length"
	))]
	pub name:  Option<String>,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email: Option<String>,
	pub role:  Option<UserRole>,
}

impl From<UpdateUserRequest> for UserUpdate {
	fn from(value: UpdateUserRequest) -> Self {
		Self { name: value.name, email: value.email, role: value.role }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateUserRequest {
	#[validate(length(
		min = 1,
		message = "a deactivation reason is required",
		code = "reason-length"
	))]
	pub reason:        String,
	/// Days until the account is reactivated, permanent when absent
	#[validate(range(
		min = 1,
		max = 3650,
		message = "duration must be between 1 and 3650 days",
		code = "duration-range"
	))]
	pub duration_days: Option<u32>,
}

impl From<DeactivateUserRequest> for NewDeactivation {
	fn from(value: DeactivateUserRequest) -> Self {
		Self { reason: value.reason, duration_days: value.duration_days }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateUserResponse {
	pub user:         UserResponse,
	pub deactivation: UserDeactivation,
}
