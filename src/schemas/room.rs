use models::{NewRoom, RoomStatus, RoomUpdate};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
	#[validate(length(min = 1, message = "name is required", code = "name-length"))]
	pub name:       String,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "capacity-range"
	))]
	pub capacity:   u32,
	#[serde(default)]
	pub facilities: Vec<String>,
	pub status:     Option<RoomStatus>,
	pub image_url:  Option<String>,
	#[validate(length(
		min = 1,
		message = "building is required",
		code = "building-length"
	))]
	pub building:   String,
	pub floor:      i32,
}

impl From<CreateRoomRequest> for NewRoom {
	fn from(value: CreateRoomRequest) -> Self {
		Self {
			name:       value.name,
			capacity:   value.capacity,
			facilities: value.facilities,
			status:     value.status,
			image_url:  value.image_url,
			building:   value.building,
			floor:      value.floor,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
	#[validate(length(min = 1, message = "name is required", code = "name-length"))]
	pub name:       Option<String>,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "capacity-range"
	))]
	pub capacity:   Option<u32>,
	pub facilities: Option<Vec<String>>,
	pub status:     Option<RoomStatus>,
	pub image_url:  Option<String>,
	pub building:   Option<String>,
	pub floor:      Option<i32>,
}

impl From<UpdateRoomRequest> for RoomUpdate {
	fn from(value: UpdateRoomRequest) -> Self {
		Self {
			name:       value.name,
			capacity:   value.capacity,
			facilities: value.facilities,
			status:     value.status,
			image_url:  value.image_url,
			building:   value.building,
			floor:      value.floor,
		}
	}
}
