use axum_extra::extract::cookie::Key;
use axum_test::{TestResponse, TestServer};
use campus_booking::schemas::auth::LoginRequest;
use campus_booking::{AppState, Config, routes};
use models::{Seeder, UserRole};
use store::Store;

pub const PASSWORD: &str = "password123";

pub const USER_EMAIL: &str = "user@campus.ac.id";
pub const ADMIN_EMAIL: &str = "admin@campus.ac.id";
pub const OTHER_USER_EMAIL: &str = "jane.smith@campus.ac.id";
pub const INACTIVE_USER_EMAIL: &str = "michael.j@campus.ac.id";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:   TestServer,
	pub state: AppState,
}

impl TestEnv {
	/// Get a test environment backed by a freshly seeded memory store
	///
	/// # Panics
	/// Panics if seeding the store or building a test server fails
	pub async fn new() -> Self {
		let config = Config::from_env();

		let store = Store::memory();

		Seeder::new(concat!(env!("CARGO_MANIFEST_DIR"), "/seed"), &store)
			.populate(false)
			.await
			.unwrap();

		let cookie_jar_key = Key::from(&[0u8; 64]);

		let state = AppState { config, store, cookie_jar_key };

		let app = Self::server(&state);

		TestEnv { app, state }
	}

	fn server(state: &AppState) -> TestServer {
		let app = routes::get_app_router(state.clone());

		TestServer::builder().save_cookies().build(app).unwrap()
	}

	/// A second client on the same store with its own cookies
	#[allow(dead_code)]
	pub fn client(&self) -> TestServer { Self::server(&self.state) }

	#[allow(dead_code)]
	pub fn store(&self) -> &Store { &self.state.store }

	#[allow(dead_code)]
	pub async fn login(&self, email: &str, role: UserRole) -> TestResponse {
		login_on(&self.app, email, role).await
	}

	#[allow(dead_code)]
	pub async fn login_user(&self) -> TestResponse {
		self.login(USER_EMAIL, UserRole::User).await
	}

	#[allow(dead_code)]
	pub async fn login_admin(&self) -> TestResponse {
		self.login(ADMIN_EMAIL, UserRole::Admin).await
	}
}

/// Log in on a given client with the seeded password
#[allow(dead_code)]
pub async fn login_on(
	server: &TestServer,
	email: &str,
	role: UserRole,
) -> TestResponse {
	server
		.post("/auth/login")
		.json(&LoginRequest {
			email: email.to_string(),
			password: PASSWORD.to_string(),
			role,
		})
		.await
}
