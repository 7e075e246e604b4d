use models::{EquipmentUpdate, NewEquipment};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
	#[validate(length(min = 1, message = "name is required", code = "name-length"))]
	pub name:        String,
	#[validate(length(
		min = 1,
		message = "category is required",
		code = "category-length"
	))]
	pub category:    String,
	#[validate(range(
		min = 1,
		max = 10000,
		message = "quantity must be between 1 and 10000",
		code = "quantity-range"
	))]
	pub quantity:    u32,
	/// Put the item under maintenance right away
	#[serde(default)]
	pub maintenance: bool,
	pub image_url:   Option<String>,
	#[serde(default)]
	pub description: String,
}

impl From<CreateEquipmentRequest> for NewEquipment {
	fn from(value: CreateEquipmentRequest) -> Self {
		Self {
			name:        value.name,
			category:    value.category,
			quantity:    value.quantity,
			maintenance: value.maintenance,
			image_url:   value.image_url,
			description: value.description,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
	#[validate(length(min = 1, message = "name is required", code = "name-length"))]
	pub name:        Option<String>,
	pub category:    Option<String>,
	#[validate(range(
		min = 1,
		max = 10000,
		message = "quantity must be between 1 and 10000",
		code = "quantity-range"
	))]
	pub quantity:    Option<u32>,
	pub maintenance: Option<bool>,
	pub image_url:   Option<String>,
	pub description: Option<String>,
}

impl From<UpdateEquipmentRequest> for EquipmentUpdate {
	fn from(value: UpdateEquipmentRequest) -> Self {
		Self {
			name:        value.name,
			category:    value.category,
			quantity:    value.quantity,
			maintenance: value.maintenance,
			image_url:   value.image_url,
			description: value.description,
		}
	}
}
