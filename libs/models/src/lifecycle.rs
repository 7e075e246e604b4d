//! Admin driven status transitions of bookings

use chrono::{DateTime, Utc};
use common::{Error, TransitionError};

use crate::{Booking, BookingStatus, BookingStatusEvent};

/// An admin decision on a booking
#[derive(Clone, Debug)]
pub enum BookingAction {
	Approve { notes: Option<String> },
	Reject { reason: String },
	Activate { notes: Option<String> },
	Complete { notes: Option<String> },
	Cancel { notes: Option<String> },
}

impl BookingAction {
	/// The status a booking ends up in after this action
	#[must_use]
	pub const fn target(&self) -> BookingStatus {
		match self {
			Self::Approve { .. } => BookingStatus::Approved,
			Self::Reject { .. } => BookingStatus::Rejected,
			Self::Activate { .. } => BookingStatus::Active,
			Self::Complete { .. } => BookingStatus::Completed,
			Self::Cancel { .. } => BookingStatus::Cancelled,
		}
	}
}

impl BookingStatus {
	/// Whether a booking may move from this status to `to`
	#[must_use]
	pub const fn can_transition_to(self, to: Self) -> bool {
		matches!(
			(self, to),
			(Self::Pending, Self::Approved | Self::Rejected)
				| (Self::Approved, Self::Active | Self::Cancelled)
				| (Self::Active, Self::Completed | Self::Cancelled)
		)
	}
}

fn non_blank(notes: Option<String>) -> Option<String> {
	notes.filter(|n| !n.trim().is_empty())
}

impl Booking {
	/// Apply an admin action to this booking, recording it on the timeline
	pub fn apply(
		&mut self,
		action: BookingAction,
		actor_id: &str,
		now: DateTime<Utc>,
	) -> Result<(), Error> {
		let target = action.target();

		if !self.status.can_transition_to(target) {
			return Err(TransitionError::Invalid {
				from: self.status.to_string(),
				to:   target.to_string(),
			}
			.into());
		}

		let notes = match action {
			BookingAction::Approve { notes } => {
				let notes = non_blank(notes);

				self.approved_by = Some(actor_id.to_string());
				self.approved_at = Some(now);
				if notes.is_some() {
					self.notes.clone_from(&notes);
				}

				notes
			},
			BookingAction::Reject { reason } => {
				if reason.trim().is_empty() {
					return Err(TransitionError::MissingReason.into());
				}

				self.rejection_reason = Some(reason.clone());

				Some(reason)
			},
			BookingAction::Activate { notes }
			| BookingAction::Complete { notes }
			| BookingAction::Cancel { notes } => non_blank(notes),
		};

		self.status = target;
		self.timeline.push(BookingStatusEvent {
			status: target,
			timestamp: now,
			by: Some(actor_id.to_string()),
			notes,
		});

		Ok(())
	}
}
