//! # Campus booking backend library

#[macro_use]
extern crate tracing;

use std::ops::Deref;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use store::Store;
use uuid::Uuid;

mod config;

pub mod controllers;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod session;

pub use config::*;

/// Id of the session that authorized the current request
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionId(pub(crate) Uuid);

impl Deref for SessionId {
	type Target = Uuid;

	fn deref(&self) -> &Self::Target { &self.0 }
}

impl std::fmt::Display for SessionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:         Config,
	pub store:          Store,
	pub cookie_jar_key: Key,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for Store {
	fn from_ref(input: &AppState) -> Self { input.store.clone() }
}

impl FromRef<AppState> for Key {
	fn from_ref(input: &AppState) -> Self { input.cookie_jar_key.clone() }
}
