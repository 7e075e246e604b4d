use chrono::NaiveDate;
use common::Error;
use serde::{Deserialize, Serialize};
use store::{CollectionKey, Record, Store};

/// A borrowing rule shown to every user
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
	pub id:      u32,
	pub title:   String,
	pub content: String,
}

impl Record for Rule {
	const KEY: CollectionKey = CollectionKey::Rules;
}

impl Rule {
	/// Get all [`Rule`]s ordered by id
	#[instrument(skip(store))]
	pub async fn get_all(store: &Store) -> Result<Vec<Self>, Error> {
		let mut rules: Vec<Self> = store.load().await?;

		rules.sort_by_key(|r| r.id);

		Ok(rules)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarEntryKind {
	Holiday,
	Exam,
	Event,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicCalendarEntry {
	pub date:  NaiveDate,
	pub title: String,
	#[serde(rename = "type")]
	pub kind:  CalendarEntryKind,
}

impl Record for AcademicCalendarEntry {
	const KEY: CollectionKey = CollectionKey::Calendar;
}

impl AcademicCalendarEntry {
	/// Get all [`AcademicCalendarEntry`]s in chronological order
	#[instrument(skip(store))]
	pub async fn get_all(store: &Store) -> Result<Vec<Self>, Error> {
		let mut entries: Vec<Self> = store.load().await?;

		entries.sort_by_key(|e| e.date);

		Ok(entries)
	}
}

/// Restrict calendar entries to an inclusive date range
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFilter {
	pub from:  Option<NaiveDate>,
	pub until: Option<NaiveDate>,
}

impl CalendarFilter {
	#[must_use]
	pub fn apply(
		&self,
		entries: Vec<AcademicCalendarEntry>,
	) -> Vec<AcademicCalendarEntry> {
		entries
			.into_iter()
			.filter(|e| {
				self.from.is_none_or(|f| e.date >= f)
					&& self.until.is_none_or(|u| e.date <= u)
			})
			.collect()
	}
}
