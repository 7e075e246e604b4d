use axum::http::StatusCode;
use axum_test::TestServer;
use campus_booking::schemas::booking::{
	CreateBookingRequest,
	RejectRequest,
	TransitionRequest,
};
use chrono::{NaiveDate, TimeDelta, Utc};
use models::{
	Booking,
	BookingCounts,
	BookingKind,
	BookingStatus,
	Equipment,
	EquipmentStatus,
	UserRole,
};

mod common;

use common::{ADMIN_EMAIL, OTHER_USER_EMAIL, TestEnv, login_on};
use serde_json::Value;

fn request(kind: BookingKind, item_id: &str) -> CreateBookingRequest {
	let start_date = Utc::now() + TimeDelta::days(3);

	CreateBookingRequest {
		kind,
		item_id: item_id.to_string(),
		start_date,
		end_date: start_date + TimeDelta::hours(2),
		purpose: "Weekly study group meeting".to_string(),
		notes: None,
	}
}

/// A booking for a single unit that is running right now
fn current_request(item_id: &str) -> CreateBookingRequest {
	let now = Utc::now();

	CreateBookingRequest {
		start_date: now - TimeDelta::hours(1),
		end_date: now + TimeDelta::hours(2),
		..request(BookingKind::Equipment, item_id)
	}
}

async fn admin(env: &TestEnv) -> TestServer {
	let admin = env.client();

	let response = login_on(&admin, ADMIN_EMAIL, UserRole::Admin).await;
	assert_eq!(response.status_code(), StatusCode::OK);

	admin
}

async fn create(env: &TestEnv, request: &CreateBookingRequest) -> Booking {
	let response = env.app.post("/bookings").json(request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<Booking>()
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let booking = create(&env, &request(BookingKind::Room, "room-1")).await;

	assert!(booking.id.starts_with("booking-"));
	assert_eq!(booking.status, BookingStatus::Pending);
	assert_eq!(booking.user_id, "user-1");
	assert_eq!(booking.user_name, "John Doe");
	assert_eq!(booking.item_name, "Lecture Room 301");
	assert_eq!(booking.timeline.len(), 1);
	assert_eq!(booking.timeline[0].status, BookingStatus::Pending);

	let mine = env.app.get("/bookings/me").await.json::<Vec<Booking>>();

	assert_eq!(mine[0].id, booking.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking_serializes_kind_as_type() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let body = env
		.app
		.post("/bookings")
		.json(&request(BookingKind::Equipment, "eq-1"))
		.await
		.json::<Value>();

	assert_eq!(body["type"], "equipment");
	assert_eq!(body["itemName"], "Projector");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking_invalid_range() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let mut invalid = request(BookingKind::Room, "room-1");
	invalid.end_date = invalid.start_date;

	let response = env.app.post("/bookings").json(&invalid).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking_short_purpose() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response = env
		.app
		.post("/bookings")
		.json(&CreateBookingRequest {
			purpose: "Study".to_string(),
			..request(BookingKind::Room, "room-1")
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking_unknown_item() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response =
		env.app.post("/bookings").json(&request(BookingKind::Room, "eq-1")).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.app
		.post("/bookings")
		.json(&request(BookingKind::Equipment, "eq-404"))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking_requires_session() {
	let env = TestEnv::new().await;

	let response =
		env.app.post("/bookings").json(&request(BookingKind::Room, "room-1")).await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_own_bookings_by_tab() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let pending = env
		.app
		.get("/bookings/me")
		.add_query_param("tab", "pending")
		.await
		.json::<Vec<Booking>>();

	assert!(pending.iter().all(|b| b.status == BookingStatus::Pending));
	assert!(pending.iter().any(|b| b.id == "booking-1"));

	let history = env
		.app
		.get("/bookings/me")
		.add_query_param("tab", "history")
		.await
		.json::<Vec<Booking>>();

	assert!(history.iter().any(|b| b.id == "booking-3"));
	assert!(history.iter().any(|b| b.id == "booking-4"));
	assert!(history.iter().all(|b| {
		matches!(
			b.status,
			BookingStatus::Completed
				| BookingStatus::Rejected
				| BookingStatus::Cancelled
		)
	}));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_own_bookings_ignores_user_filter() {
	let env = TestEnv::new().await;

	login_on(&env.app, OTHER_USER_EMAIL, UserRole::User).await;

	let bookings = env
		.app
		.get("/bookings/me")
		.add_query_param("userId", "user-1")
		.await
		.json::<Vec<Booking>>();

	assert!(bookings.iter().all(|b| b.user_id == "user-2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_own_booking_stats() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let counts = env.app.get("/bookings/me/stats").await.json::<BookingCounts>();

	assert_eq!(counts.total, 4);
	assert_eq!(counts.pending, 1);
	assert_eq!(counts.active, 1);
	assert_eq!(counts.completed, 1);
	assert_eq!(counts.rejected, 1);
	assert_eq!(counts.cancelled, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_booking_as_owner_and_admin() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response = env.app.get("/bookings/booking-1").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let admin = admin(&env).await;

	let response = admin.get("/bookings/booking-1").await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_booking_of_someone_else() {
	let env = TestEnv::new().await;

	login_on(&env.app, OTHER_USER_EMAIL, UserRole::User).await;

	let response = env.app.get("/bookings/booking-1").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_all_bookings_as_user() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response = env.app.get("/bookings").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_all_bookings_filtered() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let bookings = admin.get("/bookings").await.json::<Vec<Booking>>();

	assert_eq!(bookings.len(), 4);
	assert!(bookings.windows(2).all(|w| w[0].created_at >= w[1].created_at));

	let bookings = admin
		.get("/bookings")
		.add_query_param("type", "equipment")
		.await
		.json::<Vec<Booking>>();

	assert!(!bookings.is_empty());
	assert!(bookings.iter().all(|b| b.kind == BookingKind::Equipment));

	let bookings = admin
		.get("/bookings")
		.add_query_param("search", "projector")
		.await
		.json::<Vec<Booking>>();

	assert!(bookings.iter().any(|b| b.id == "booking-2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_booking_stats() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let counts = admin.get("/bookings/stats").await.json::<BookingCounts>();

	assert_eq!(counts.total, 4);
	assert_eq!(counts.pending, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn approve_booking() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let response = admin
		.post("/bookings/booking-1/approve")
		.json(&TransitionRequest { notes: Some("Key at the front desk".to_string()) })
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let booking = response.json::<Booking>();

	assert_eq!(booking.status, BookingStatus::Approved);
	assert_eq!(booking.approved_by.as_deref(), Some("admin-1"));
	assert!(booking.approved_at.is_some());
	assert_eq!(booking.notes.as_deref(), Some("Key at the front desk"));

	let last = booking.timeline.last().unwrap();

	assert_eq!(last.status, BookingStatus::Approved);
	assert_eq!(last.by.as_deref(), Some("admin-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn approve_booking_without_body() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let response = admin.post("/bookings/booking-1/approve").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Booking>().status, BookingStatus::Approved);
}

#[tokio::test(flavor = "multi_thread")]
async fn approve_booking_as_user() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response = env.app.post("/bookings/booking-1/approve").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_transition() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	// completed bookings are final
	let response = admin.post("/bookings/booking-3/cancel").await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	// pending bookings must be approved before they can start
	let response = admin.post("/bookings/booking-1/activate").await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let booking = admin.get("/bookings/booking-1").await.json::<Booking>();

	assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test(flavor = "multi_thread")]
async fn transition_unknown_booking() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let response = admin.post("/bookings/booking-404/approve").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn reject_booking() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let response = admin
		.post("/bookings/booking-1/reject")
		.json(&RejectRequest { reason: "Room is under renovation".to_string() })
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let booking = response.json::<Booking>();

	assert_eq!(booking.status, BookingStatus::Rejected);
	assert_eq!(
		booking.rejection_reason.as_deref(),
		Some("Room is under renovation")
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn reject_booking_without_reason() {
	let env = TestEnv::new().await;

	let admin = admin(&env).await;

	let response = admin
		.post("/bookings/booking-1/reject")
		.json(&RejectRequest { reason: "   ".to_string() })
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let booking = create(&env, &request(BookingKind::Room, "room-5")).await;

	let admin = admin(&env).await;

	for action in ["approve", "activate", "complete"] {
		let response =
			admin.post(&format!("/bookings/{}/{action}", booking.id)).await;

		assert_eq!(response.status_code(), StatusCode::OK);
	}

	let booking =
		env.app.get(&format!("/bookings/{}", booking.id)).await.json::<Booking>();

	assert_eq!(booking.status, BookingStatus::Completed);

	let statuses: Vec<BookingStatus> =
		booking.timeline.iter().map(|e| e.status).collect();

	assert_eq!(statuses, vec![
		BookingStatus::Pending,
		BookingStatus::Approved,
		BookingStatus::Active,
		BookingStatus::Completed,
	]);
}

#[tokio::test(flavor = "multi_thread")]
async fn approval_reserves_equipment() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let booking = create(&env, &current_request("eq-4")).await;

	// pending bookings do not reserve anything
	let item = env.app.get("/equipment/eq-4").await.json::<Equipment>();

	assert_eq!(item.available, 3);

	let admin = admin(&env).await;

	admin.post(&format!("/bookings/{}/approve", booking.id)).await;

	let item = env.app.get("/equipment/eq-4").await.json::<Equipment>();

	assert_eq!(item.available, 2);
	assert_eq!(item.status, EquipmentStatus::Booked);

	admin.post(&format!("/bookings/{}/cancel", booking.id)).await;

	let item = env.app.get("/equipment/eq-4").await.json::<Equipment>();

	assert_eq!(item.available, 3);
	assert_eq!(item.status, EquipmentStatus::Available);
}

#[tokio::test(flavor = "multi_thread")]
async fn fully_reserved_equipment_is_in_use() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let mut ids = vec![];
	for _ in 0..3 {
		ids.push(create(&env, &current_request("eq-4")).await.id);
	}

	let admin = admin(&env).await;

	for id in &ids {
		let response = admin.post(&format!("/bookings/{id}/approve")).await;

		assert_eq!(response.status_code(), StatusCode::OK);
	}

	let item = env.app.get("/equipment/eq-4").await.json::<Equipment>();

	assert_eq!(item.available, 0);
	assert_eq!(item.status, EquipmentStatus::InUse);
}

#[tokio::test(flavor = "multi_thread")]
async fn future_approvals_keep_equipment_available() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let booking =
		create(&env, &request(BookingKind::Equipment, "eq-4")).await;

	let admin = admin(&env).await;

	admin.post(&format!("/bookings/{}/approve", booking.id)).await;

	let item = env.app.get("/equipment/eq-4").await.json::<Equipment>();

	assert_eq!(item.available, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn maintenance_flag_does_not_mask_availability() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let booking = create(&env, &current_request("eq-4")).await;

	let admin = admin(&env).await;

	admin
		.patch("/equipment/eq-4")
		.json(&serde_json::json!({ "maintenance": true }))
		.await;

	admin.post(&format!("/bookings/{}/approve", booking.id)).await;

	let item = env.app.get("/equipment/eq-4").await.json::<Equipment>();

	assert!(item.maintenance);
	assert_eq!(item.available, 2);
	assert_eq!(item.status, EquipmentStatus::Booked);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_schedule() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let booking = create(&env, &request(BookingKind::Room, "room-4")).await;
	let day = booking.start_date.date_naive();

	let admin = admin(&env).await;

	// pending bookings are not on the schedule
	let schedule = env
		.app
		.get("/bookings/schedule")
		.add_query_param("itemId", "room-4")
		.add_query_param("date", day.to_string())
		.await
		.json::<Vec<Booking>>();

	assert!(schedule.is_empty());

	admin.post(&format!("/bookings/{}/approve", booking.id)).await;

	let schedule = env
		.app
		.get("/bookings/schedule")
		.add_query_param("itemId", "room-4")
		.add_query_param("date", day.to_string())
		.await
		.json::<Vec<Booking>>();

	assert_eq!(schedule.len(), 1);
	assert_eq!(schedule[0].id, booking.id);

	let schedule = env
		.app
		.get("/bookings/schedule")
		.add_query_param("itemId", "room-1")
		.add_query_param("date", day.to_string())
		.await
		.json::<Vec<Booking>>();

	assert!(schedule.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_schedule_of_last_date() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response = env
		.app
		.get("/bookings/schedule")
		.add_query_param("itemId", "room-1")
		.add_query_param("date", NaiveDate::MAX.to_string())
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

	// the server is still up
	let response = env.app.get("/healthcheck").await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}
