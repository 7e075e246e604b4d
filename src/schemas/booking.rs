use chrono::{DateTime, NaiveDate, Utc};
use models::{BookingKind, NewBooking};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	#[serde(rename = "type")]
	pub kind:       BookingKind,
	pub item_id:    String,
	pub start_date: DateTime<Utc>,
	pub end_date:   DateTime<Utc>,
	#[validate(length(
		min = 10,
		message = "purpose must be at least 10 characters long",
		code = "purpose-length"
	))]
	pub purpose:    String,
	pub notes:      Option<String>,
}

impl From<CreateBookingRequest> for NewBooking {
	fn from(value: CreateBookingRequest) -> Self {
		Self {
			kind:       value.kind,
			item_id:    value.item_id,
			start_date: value.start_date,
			end_date:   value.end_date,
			purpose:    value.purpose,
			notes:      value.notes,
		}
	}
}

/// Optional admin remarks attached to a status change
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
	pub notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequest {
	pub reason: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
	pub item_id: String,
	pub date:    NaiveDate,
}
