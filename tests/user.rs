use axum::http::StatusCode;
use campus_booking::schemas::user::{
	CreateUserRequest,
	DeactivateUserRequest,
	DeactivateUserResponse,
	UpdateUserRequest,
	UserResponse,
};
use chrono::{TimeDelta, Utc};
use models::{UserDeactivation, UserRole, UserStats};

mod common;

use common::{OTHER_USER_EMAIL, PASSWORD, TestEnv, login_on};

fn new_user() -> CreateUserRequest {
	CreateUserRequest {
		name:     "Budi Santoso".to_string(),
		email:    "budi@campus.ac.id".to_string(),
		role:     UserRole::User,
		password: PASSWORD.to_string(),
	}
}

fn deactivation(duration_days: Option<u32>) -> DeactivateUserRequest {
	DeactivateUserRequest {
		reason: "Repeated no-shows".to_string(),
		duration_days,
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn get_users() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.get("/users").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Vec<UserResponse>>().len(), 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_users_as_user() {
	let env = TestEnv::new().await;

	env.login_user().await;

	let response = env.app.get("/users").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn filter_users() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let users = env
		.app
		.get("/users")
		.add_query_param("status", "inactive")
		.await
		.json::<Vec<UserResponse>>();

	assert_eq!(users.len(), 1);
	assert_eq!(users[0].id, "user-3");

	let users = env
		.app
		.get("/users")
		.add_query_param("role", "admin")
		.await
		.json::<Vec<UserResponse>>();

	assert!(users.iter().all(|u| u.role == UserRole::Admin));
	assert_eq!(users.len(), 2);

	let users = env
		.app
		.get("/users")
		.add_query_param("search", "JANE")
		.await
		.json::<Vec<UserResponse>>();

	assert_eq!(users.len(), 1);
	assert_eq!(users[0].email, OTHER_USER_EMAIL);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_user_stats() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let stats = env.app.get("/users/stats").await.json::<UserStats>();

	assert_eq!(stats.total, 6);
	assert_eq!(stats.active, 5);
	assert_eq!(stats.inactive, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_user() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.get("/users/user-2").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<UserResponse>().email, OTHER_USER_EMAIL);

	let response = env.app.get("/users/user-404").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_user() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.post("/users").json(&new_user()).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let user = response.json::<UserResponse>();

	assert!(user.id.starts_with("user-"));
	assert!(user.is_active);

	let client = env.client();
	let response = login_on(&client, "budi@campus.ac.id", UserRole::User).await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_user_duplicate_email() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/users")
		.json(&CreateUserRequest {
			email: "Jane.Smith@campus.ac.id".to_string(),
			..new_user()
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_user_short_password() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/users")
		.json(&CreateUserRequest { password: "123".to_string(), ..new_user() })
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_user() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.patch("/users/user-2")
		.json(&UpdateUserRequest {
			role: Some(UserRole::Admin),
			..Default::default()
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let user = response.json::<UserResponse>();

	assert_eq!(user.role, UserRole::Admin);
	assert_eq!(user.email, OTHER_USER_EMAIL);
}

#[tokio::test(flavor = "multi_thread")]
async fn demoted_admin_loses_access() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let other_admin = env.client();
	login_on(&other_admin, "support@campus.ac.id", UserRole::Admin).await;

	assert_eq!(
		other_admin.get("/users").await.status_code(),
		StatusCode::OK
	);

	env.app
		.patch("/users/admin-2")
		.json(&UpdateUserRequest {
			role: Some(UserRole::User),
			..Default::default()
		})
		.await;

	assert_eq!(
		other_admin.get("/users").await.status_code(),
		StatusCode::FORBIDDEN
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivate_user() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/users/user-2/deactivate")
		.json(&deactivation(Some(7)))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<DeactivateUserResponse>();

	assert!(!body.user.is_active);
	assert_eq!(body.deactivation.deactivated_by, "admin-1");
	assert_eq!(body.deactivation.duration_days, Some(7));

	let reactivate_at = body.deactivation.reactivate_at.unwrap();

	assert_eq!(
		reactivate_at - body.deactivation.deactivated_at,
		TimeDelta::days(7)
	);

	let client = env.client();
	let response = login_on(&client, OTHER_USER_EMAIL, UserRole::User).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivation_ends_open_sessions() {
	let env = TestEnv::new().await;

	let client = env.client();
	login_on(&client, OTHER_USER_EMAIL, UserRole::User).await;

	assert_eq!(client.get("/auth/me").await.status_code(), StatusCode::OK);

	env.login_admin().await;
	env.app.post("/users/user-2/deactivate").json(&deactivation(None)).await;

	assert_eq!(
		client.get("/auth/me").await.status_code(),
		StatusCode::FORBIDDEN
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivate_without_reason() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/users/user-2/deactivate")
		.json(&DeactivateUserRequest {
			reason: String::new(),
			duration_days: None,
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivate_for_too_long() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	for days in [3651, u32::MAX] {
		let response = env
			.app
			.post("/users/user-2/deactivate")
			.json(&deactivation(Some(days)))
			.await;

		assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	}

	let response = env
		.app
		.post("/users/user-2/deactivate")
		.json(&deactivation(Some(3650)))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivate_self() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/users/admin-1/deactivate")
		.json(&deactivation(None))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn activate_user() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	env.app.post("/users/user-2/deactivate").json(&deactivation(None)).await;

	let response = env.app.post("/users/user-2/activate").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<UserResponse>().is_active);

	let history = env
		.app
		.get("/users/user-2/deactivations")
		.await
		.json::<Vec<UserDeactivation>>();

	assert_eq!(history.len(), 1);
	assert!(history[0].lifted_at.is_some());

	let client = env.client();
	let response = login_on(&client, OTHER_USER_EMAIL, UserRole::User).await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn activate_seeded_inactive_user() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.post("/users/user-3/activate").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<UserResponse>().is_active);
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_deactivation_is_lifted() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	env.app.post("/users/user-2/deactivate").json(&deactivation(Some(1))).await;

	// Move the deactivation into the past
	let store = env.store();
	let mut records: Vec<UserDeactivation> = store.load().await.unwrap();
	for record in &mut records {
		record.deactivated_at -= TimeDelta::days(2);
		record.reactivate_at = Some(Utc::now() - TimeDelta::days(1));
	}
	store.save(&records).await.unwrap();

	let client = env.client();
	let response = login_on(&client, OTHER_USER_EMAIL, UserRole::User).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let history = env
		.app
		.get("/users/user-2/deactivations")
		.await
		.json::<Vec<UserDeactivation>>();

	assert!(history[0].lifted_at.is_some());
}
