//! Defines controller functions that correspond to individual routes

use axum::extract::State;
use axum::response::NoContent;
use common::Error;
use store::{CollectionKey, Store};

pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod equipment;
pub mod info;
pub mod profile;
pub mod room;
pub mod user;

/// Check if the store and webserver are functional
pub(crate) async fn healthcheck(
	State(store): State<Store>,
) -> Result<NoContent, Error> {
	store.has_collection(CollectionKey::Users).await?;

	Ok(NoContent)
}
