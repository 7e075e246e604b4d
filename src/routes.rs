use axum::Router;
use axum::routing::{get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{get_current_user, login, logout};
use crate::controllers::booking::{
	activate_booking,
	approve_booking,
	cancel_booking,
	complete_booking,
	create_booking,
	get_all_bookings,
	get_booking,
	get_booking_stats,
	get_own_booking_stats,
	get_own_bookings,
	get_schedule,
	reject_booking,
};
use crate::controllers::dashboard::get_dashboard_stats;
use crate::controllers::equipment::{
	create_equipment,
	get_categories,
	get_equipment,
	get_equipment_item,
	get_equipment_stats,
	update_equipment,
};
use crate::controllers::healthcheck;
use crate::controllers::info::{get_calendar, get_rules};
use crate::controllers::profile::{change_password, update_current_user};
use crate::controllers::room::{
	create_room,
	get_buildings,
	get_room,
	get_room_stats,
	get_rooms,
	update_room,
};
use crate::controllers::user::{
	activate_user,
	create_user,
	deactivate_user,
	get_user,
	get_user_deactivations,
	get_user_stats,
	get_users,
	update_user,
};
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.route("/rules", get(get_rules))
		.route("/calendar", get(get_calendar))
		.nest("/auth", auth_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/rooms", room_routes(&state))
		.nest("/equipment", equipment_routes(&state))
		.nest("/bookings", booking_routes(&state))
		.nest("/users", user_routes(&state))
		.nest("/dashboard", dashboard_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(state.config.request_timeout))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/logout", post(logout))
		.route("/me", get(get_current_user))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new().route("/login", post(login)).merge(authenticated)
}

/// Account settings of the signed in user
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/me", patch(update_current_user))
		.route("/me/password", post(change_password))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Room routes, writes are admin only
fn room_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_room))
		.route("/{id}", patch(update_room))
		.route_layer(AdminLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_rooms))
		.route("/stats", get(get_room_stats))
		.route("/buildings", get(get_buildings))
		.route("/{id}", get(get_room))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Equipment routes, writes are admin only
fn equipment_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_equipment))
		.route("/{id}", patch(update_equipment))
		.route_layer(AdminLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_equipment))
		.route("/stats", get(get_equipment_stats))
		.route("/categories", get(get_categories))
		.route("/{id}", get(get_equipment_item))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Booking routes, reviewing bookings is admin only
fn booking_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", get(get_all_bookings))
		.route("/stats", get(get_booking_stats))
		.route("/{id}/approve", post(approve_booking))
		.route("/{id}/reject", post(reject_booking))
		.route("/{id}/activate", post(activate_booking))
		.route("/{id}/complete", post(complete_booking))
		.route("/{id}/cancel", post(cancel_booking))
		.route_layer(AdminLayer::new(state.clone()));

	Router::new()
		.route("/", post(create_booking))
		.route("/me", get(get_own_bookings))
		.route("/me/stats", get(get_own_booking_stats))
		.route("/schedule", get(get_schedule))
		.route("/{id}", get(get_booking))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

/// User management routes, admin only
fn user_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_users).post(create_user))
		.route("/stats", get(get_user_stats))
		.route("/{id}", get(get_user).patch(update_user))
		.route("/{id}/deactivations", get(get_user_deactivations))
		.route("/{id}/deactivate", post(deactivate_user))
		.route("/{id}/activate", post(activate_user))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()))
}

fn dashboard_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/stats", get(get_dashboard_stats))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()))
}
