//! Controllers for [`Room`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::Error;
use models::{NewRoom, Room, RoomFilter, RoomStats, RoomUpdate};
use store::Store;
use validator::Validate;

use crate::schemas::room::{CreateRoomRequest, UpdateRoomRequest};

/// Get all rooms matching the given filter
#[instrument(skip(store))]
pub(crate) async fn get_rooms(
	State(store): State<Store>,
	Query(filter): Query<RoomFilter>,
) -> Result<Json<Vec<Room>>, Error> {
	let rooms = Room::get_all(&store).await?;

	Ok(Json(filter.apply(rooms)))
}

#[instrument(skip(store))]
pub(crate) async fn get_room_stats(
	State(store): State<Store>,
) -> Result<Json<RoomStats>, Error> {
	let rooms = Room::get_all(&store).await?;

	Ok(Json(RoomStats::from(rooms.as_slice())))
}

#[instrument(skip(store))]
pub(crate) async fn get_buildings(
	State(store): State<Store>,
) -> Result<Json<Vec<String>>, Error> {
	let rooms = Room::get_all(&store).await?;

	Ok(Json(Room::buildings(&rooms)))
}

#[instrument(skip(store))]
pub(crate) async fn get_room(
	State(store): State<Store>,
	Path(id): Path<String>,
) -> Result<Json<Room>, Error> {
	let room = Room::get_by_id(&id, &store).await?;

	Ok(Json(room))
}

#[instrument(skip(store))]
pub(crate) async fn create_room(
	State(store): State<Store>,
	Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let room = NewRoom::from(request).insert(&store).await?;

	Ok((StatusCode::CREATED, Json(room)))
}

#[instrument(skip(store))]
pub(crate) async fn update_room(
	State(store): State<Store>,
	Path(id): Path<String>,
	Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, Error> {
	request.validate()?;

	let room = RoomUpdate::from(request).apply(&id, &store).await?;

	Ok(Json(room))
}
