//! Domain models of the booking portal and the logic operating on them

#[macro_use]
extern crate tracing;

use uuid::Uuid;

mod availability;
mod booking;
mod dashboard;
mod deactivation;
mod equipment;
mod info;
mod lifecycle;
mod room;
mod seed;
mod user;

pub use availability::*;
pub use booking::*;
pub use dashboard::*;
pub use deactivation::*;
pub use equipment::*;
pub use info::*;
pub use lifecycle::*;
pub use room::*;
pub use seed::*;
pub use user::*;

/// Generate a new unique identifier with a readable prefix
pub(crate) fn new_id(prefix: &str) -> String {
	format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Case insensitive substring match, an absent or empty needle always matches
pub(crate) fn matches_search(haystacks: &[&str], needle: Option<&str>) -> bool {
	let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
		return true;
	};

	let needle = needle.to_lowercase();

	haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}
