use models::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
	pub email:    String,
	pub password: String,
	#[serde(default)]
	pub role:     UserRole,
}
