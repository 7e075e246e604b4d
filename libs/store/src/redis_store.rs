use common::{Error, RedisConn};
use redis::AsyncCommands;

/// Redis backed key-value store
#[derive(Clone)]
pub struct RedisStore {
	connection: RedisConn,
}

impl std::fmt::Debug for RedisStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RedisStore").finish_non_exhaustive()
	}
}

impl RedisStore {
	/// Open a multiplexed connection to the given redis url
	pub(crate) async fn connect(url: &str) -> Result<Self, Error> {
		let client = redis::Client::open(url)?;
		let connection = client.get_multiplexed_async_connection().await?;

		Ok(Self { connection })
	}

	pub(crate) async fn get(&self, key: &str) -> Result<Option<String>, Error> {
		let mut conn = self.connection.clone();

		let value: Option<String> = conn.get(key).await?;

		Ok(value)
	}

	pub(crate) async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
		let mut conn = self.connection.clone();

		let () = conn.set(key, value).await?;

		Ok(())
	}

	pub(crate) async fn set_ex(
		&self,
		key: &str,
		value: &str,
		seconds: u64,
	) -> Result<(), Error> {
		let mut conn = self.connection.clone();

		let () = conn.set_ex(key, value, seconds).await?;

		Ok(())
	}

	pub(crate) async fn delete(&self, key: &str) -> Result<(), Error> {
		let mut conn = self.connection.clone();

		let _: i32 = conn.del(key).await?;

		Ok(())
	}

	pub(crate) async fn exists(&self, key: &str) -> Result<bool, Error> {
		let mut conn = self.connection.clone();

		let exists: i32 = conn.exists(key).await?;

		Ok(exists == 1)
	}
}
