use std::net::SocketAddr;
use std::path::PathBuf;

use axum_extra::extract::cookie::Key;
use store::Store;

#[derive(Clone, Debug)]
pub struct Config {
	pub store_url:    String,
	pub bind_address: SocketAddr,
	pub seed_dir:     PathBuf,

	pub production:      bool,
	pub request_timeout: std::time::Duration,

	pub access_cookie_name:     String,
	pub access_cookie_lifetime: time::Duration,
}

impl Config {
	fn get_env_var<T, F>(var: &str, default: &str, parse: F) -> T
	where
		F: FnOnce(String) -> Option<T>,
	{
		let value = std::env::var(var).unwrap_or_else(|_| default.to_string());

		parse(value).unwrap_or_else(|| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// Unset variables fall back to their defaults
	///
	/// # Panics
	/// Panics if an environment variable is malformed
	#[must_use]
	pub fn from_env() -> Self {
		let store_url = Self::get_env_var("STORE_URL", "memory://", Some);
		let bind_address =
			Self::get_env_var("BIND_ADDRESS", "0.0.0.0:80", |v| v.parse().ok());
		let seed_dir = Self::get_env_var("SEED_DIR", "seed", |v| {
			Some(PathBuf::from(v))
		});

		let production =
			Self::get_env_var("PRODUCTION", "false", |v| v.parse().ok());
		let request_timeout = std::time::Duration::from_secs(
			Self::get_env_var("REQUEST_TIMEOUT_SECONDS", "10", |v| {
				v.parse().ok()
			}),
		);

		let access_cookie_name = Self::get_env_var(
			"ACCESS_COOKIE_NAME",
			"campus_access_token",
			Some,
		);
		let access_cookie_lifetime = time::Duration::minutes(Self::get_env_var(
			"ACCESS_COOKIE_LIFETIME_MINUTES",
			"1440",
			|v| v.parse().ok().filter(|m: &i64| *m > 0),
		));

		Self {
			store_url,
			bind_address,
			seed_dir,
			production,
			request_timeout,
			access_cookie_name,
			access_cookie_lifetime,
		}
	}

	/// Connect to the configured store
	///
	/// # Panics
	/// Panics if connecting to the store fails
	pub async fn create_store(&self) -> Store {
		Store::connect(&self.store_url)
			.await
			.unwrap_or_else(|e| panic!("COULD NOT CONNECT TO STORE -- {e:?}"))
	}

	/// Load the key used to encrypt private cookies
	///
	/// Sessions do not survive a restart when no key is configured
	///
	/// # Panics
	/// Panics if `COOKIE_JAR_KEY` is set but shorter than 64 bytes
	#[must_use]
	pub fn create_cookie_jar_key() -> Key {
		let Ok(secret) = std::env::var("COOKIE_JAR_KEY") else {
			warn!("COOKIE_JAR_KEY is not set, generating a random key");

			return Key::generate();
		};

		assert!(secret.len() >= 64, "COOKIE_JAR_KEY must be set");

		Key::from(secret.as_bytes())
	}
}
