//! Request and response bodies of the HTTP API

pub mod auth;
pub mod booking;
pub mod equipment;
pub mod profile;
pub mod room;
pub mod user;
