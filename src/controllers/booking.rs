//! Controllers for [`Booking`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::Error;
use models::{
	Booking,
	BookingAction,
	BookingCounts,
	BookingFilter,
	NewBooking,
	User,
};
use store::Store;
use validator::Validate;

use crate::schemas::booking::{
	CreateBookingRequest,
	RejectRequest,
	ScheduleQuery,
	TransitionRequest,
};
use crate::session::{AdminSession, Session};

/// Submit a new booking request for the signed in user
#[instrument(skip(store))]
pub(crate) async fn create_booking(
	State(store): State<Store>,
	session: Session,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let user = User::get_by_id(&session.data.user_id, &store).await?;

	let booking =
		NewBooking::from(request).insert(&user, Utc::now(), &store).await?;

	Ok((StatusCode::CREATED, Json(booking)))
}

/// Get the bookings of the signed in user
#[instrument(skip(store))]
pub(crate) async fn get_own_bookings(
	State(store): State<Store>,
	session: Session,
	Query(mut filter): Query<BookingFilter>,
) -> Result<Json<Vec<Booking>>, Error> {
	filter.user_id = None;

	let bookings = Booking::for_user(&session.data.user_id, &store).await?;

	Ok(Json(filter.apply(bookings)))
}

#[instrument(skip(store))]
pub(crate) async fn get_own_booking_stats(
	State(store): State<Store>,
	session: Session,
) -> Result<Json<BookingCounts>, Error> {
	let bookings = Booking::for_user(&session.data.user_id, &store).await?;

	Ok(Json(BookingCounts::from(bookings.as_slice())))
}

/// Get the reserving bookings of one item on one day
#[instrument(skip(store))]
pub(crate) async fn get_schedule(
	State(store): State<Store>,
	Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<Booking>>, Error> {
	let bookings = Booking::get_all(&store).await?;

	Ok(Json(Booking::schedule(&bookings, &query.item_id, query.date)?))
}

/// Get a single booking, only its owner and admins may see it
#[instrument(skip(store))]
pub(crate) async fn get_booking(
	State(store): State<Store>,
	session: Session,
	Path(id): Path<String>,
) -> Result<Json<Booking>, Error> {
	let booking = Booking::get_by_id(&id, &store).await?;

	if booking.user_id != session.data.user_id {
		let user = User::get_by_id(&session.data.user_id, &store).await?;

		if !user.is_admin() {
			return Err(Error::Forbidden);
		}
	}

	Ok(Json(booking))
}

#[instrument(skip(store))]
pub(crate) async fn get_all_bookings(
	State(store): State<Store>,
	Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<Booking>>, Error> {
	let bookings = Booking::get_all(&store).await?;

	Ok(Json(filter.apply(bookings)))
}

#[instrument(skip(store))]
pub(crate) async fn get_booking_stats(
	State(store): State<Store>,
) -> Result<Json<BookingCounts>, Error> {
	let bookings = Booking::get_all(&store).await?;

	Ok(Json(BookingCounts::from(bookings.as_slice())))
}

async fn transition(
	store: &Store,
	session: &AdminSession,
	id: &str,
	action: BookingAction,
) -> Result<Json<Booking>, Error> {
	let booking =
		Booking::transition(id, action, &session.admin, Utc::now(), store)
			.await?;

	Ok(Json(booking))
}

fn notes(request: Option<Json<TransitionRequest>>) -> Option<String> {
	request.and_then(|Json(r)| r.notes)
}

#[instrument(skip(store, session))]
pub(crate) async fn approve_booking(
	State(store): State<Store>,
	session: AdminSession,
	Path(id): Path<String>,
	request: Option<Json<TransitionRequest>>,
) -> Result<Json<Booking>, Error> {
	let action = BookingAction::Approve { notes: notes(request) };

	transition(&store, &session, &id, action).await
}

#[instrument(skip(store, session))]
pub(crate) async fn reject_booking(
	State(store): State<Store>,
	session: AdminSession,
	Path(id): Path<String>,
	Json(request): Json<RejectRequest>,
) -> Result<Json<Booking>, Error> {
	let action = BookingAction::Reject { reason: request.reason };

	transition(&store, &session, &id, action).await
}

#[instrument(skip(store, session))]
pub(crate) async fn activate_booking(
	State(store): State<Store>,
	session: AdminSession,
	Path(id): Path<String>,
	request: Option<Json<TransitionRequest>>,
) -> Result<Json<Booking>, Error> {
	let action = BookingAction::Activate { notes: notes(request) };

	transition(&store, &session, &id, action).await
}

#[instrument(skip(store, session))]
pub(crate) async fn complete_booking(
	State(store): State<Store>,
	session: AdminSession,
	Path(id): Path<String>,
	request: Option<Json<TransitionRequest>>,
) -> Result<Json<Booking>, Error> {
	let action = BookingAction::Complete { notes: notes(request) };

	transition(&store, &session, &id, action).await
}

#[instrument(skip(store, session))]
pub(crate) async fn cancel_booking(
	State(store): State<Store>,
	session: AdminSession,
	Path(id): Path<String>,
	request: Option<Json<TransitionRequest>>,
) -> Result<Json<Booking>, Error> {
	let action = BookingAction::Cancel { notes: notes(request) };

	transition(&store, &session, &id, action).await
}
