//! Controllers for [`Equipment`]
//!
//! Every read recomputes availability from the bookings active right now

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::Error;
use models::{
	Equipment,
	EquipmentFilter,
	EquipmentStats,
	EquipmentUpdate,
	NewEquipment,
};
use store::Store;
use validator::Validate;

use crate::schemas::equipment::{CreateEquipmentRequest, UpdateEquipmentRequest};

#[instrument(skip(store))]
pub(crate) async fn get_equipment(
	State(store): State<Store>,
	Query(filter): Query<EquipmentFilter>,
) -> Result<Json<Vec<Equipment>>, Error> {
	let equipment = Equipment::get_all_current(Utc::now(), &store).await?;

	Ok(Json(filter.apply(equipment)))
}

#[instrument(skip(store))]
pub(crate) async fn get_equipment_stats(
	State(store): State<Store>,
) -> Result<Json<EquipmentStats>, Error> {
	let equipment = Equipment::get_all_current(Utc::now(), &store).await?;

	Ok(Json(EquipmentStats::from(equipment.as_slice())))
}

#[instrument(skip(store))]
pub(crate) async fn get_categories(
	State(store): State<Store>,
) -> Result<Json<Vec<String>>, Error> {
	let equipment = Equipment::get_all(&store).await?;

	Ok(Json(Equipment::categories(&equipment)))
}

#[instrument(skip(store))]
pub(crate) async fn get_equipment_item(
	State(store): State<Store>,
	Path(id): Path<String>,
) -> Result<Json<Equipment>, Error> {
	let item = Equipment::get_current(&id, Utc::now(), &store).await?;

	Ok(Json(item))
}

#[instrument(skip(store))]
pub(crate) async fn create_equipment(
	State(store): State<Store>,
	Json(request): Json<CreateEquipmentRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let item = NewEquipment::from(request).insert(Utc::now(), &store).await?;

	Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(store))]
pub(crate) async fn update_equipment(
	State(store): State<Store>,
	Path(id): Path<String>,
	Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<Equipment>, Error> {
	request.validate()?;

	let item =
		EquipmentUpdate::from(request).apply(&id, Utc::now(), &store).await?;

	Ok(Json(item))
}
