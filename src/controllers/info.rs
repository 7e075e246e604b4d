//! Read-only campus information: booking rules and the academic calendar

use axum::Json;
use axum::extract::{Query, State};
use common::Error;
use models::{AcademicCalendarEntry, CalendarFilter, Rule};
use store::Store;

#[instrument(skip(store))]
pub(crate) async fn get_rules(
	State(store): State<Store>,
) -> Result<Json<Vec<Rule>>, Error> {
	let rules = Rule::get_all(&store).await?;

	Ok(Json(rules))
}

#[instrument(skip(store))]
pub(crate) async fn get_calendar(
	State(store): State<Store>,
	Query(filter): Query<CalendarFilter>,
) -> Result<Json<Vec<AcademicCalendarEntry>>, Error> {
	let entries = AcademicCalendarEntry::get_all(&store).await?;

	Ok(Json(filter.apply(entries)))
}
