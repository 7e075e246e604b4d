use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	#[validate(email(message = "invalid email", code = "email"))]
	pub email: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
	pub current_password: String,
	#[validate(length(
		min = 6,
		message = "password must be at least 6 characters long",
		code = "password-length"
	))]
	pub new_password:     String,
	#[validate(must_match(
		other = "new_password",
		message = "passwords do not match",
		code = "password-confirmation"
	))]
	pub confirm_password: String,
}
