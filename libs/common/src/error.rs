//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Some data in the request was missing
	#[error("{0}")]
	MissingRequestData(String),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to submitting a booking
	#[error(transparent)]
	CreateBookingError(#[from] CreateBookingError),
	/// Any error related to moving a booking between states
	#[error(transparent)]
	TransitionError(#[from] TransitionError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// Codes only ever increase, a code is never reused once it has been
	/// assigned to a variant
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownAccount(_) => 6,
					LoginError::InvalidPassword => 7,
					LoginError::Disabled => 8,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 9,
					TokenError::MissingSession => 10,
				}
			},
			Self::CreateBookingError(e) => {
				match e {
					CreateBookingError::InvalidRange { .. } => 11,
				}
			},
			Self::TransitionError(e) => {
				match e {
					TransitionError::Invalid { .. } => 12,
					TransitionError::MissingReason => 13,
				}
			},
			Self::ValidationError(_) => 14,
			Self::MissingRequestData(_) => 15,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownAccount(m))
			| Self::ValidationError(m)
			| Self::MissingRequestData(m) => Some(m.to_owned()),
			Self::CreateBookingError(CreateBookingError::InvalidRange {
				start,
				end,
			}) => Some(serde_json::json!({"start": start, "end": end}).to_string()),
			Self::TransitionError(TransitionError::Invalid { from, to }) => {
				Some(serde_json::json!({"from": from, "to": to}).to_string())
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_) => StatusCode::CONFLICT,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::CreateBookingError(_) | Self::TransitionError(_) => {
				StatusCode::BAD_REQUEST
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) | Self::MissingRequestData(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no account found for '{0}' with the requested role")]
	UnknownAccount(String),
	#[error("invalid password")]
	InvalidPassword,
	#[error("account is deactivated")]
	Disabled,
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
}

/// Any error related to submitting a booking
#[derive(Debug, Error)]
pub enum CreateBookingError {
	/// The end of the requested range does not come after its start
	#[error("the end of a booking must come after its start")]
	InvalidRange { start: DateTime<Utc>, end: DateTime<Utc> },
}

/// Any error related to booking status transitions
#[derive(Debug, Error)]
pub enum TransitionError {
	/// The requested status can not be reached from the current one
	#[error("a booking can not go from {from} to {to}")]
	Invalid { from: String, to: String },
	/// Rejections must carry a reason
	#[error("a rejection reason is required")]
	MissingReason,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error handling some form of I/O
	#[error("I/O error -- {0:?}")]
	IOError(std::io::Error),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
	/// A store URL with an unknown scheme was configured
	#[error("unsupported store url -- {0}")]
	UnsupportedStoreUrl(String),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalServerError::RedisError(err).into()
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		InternalServerError::IOError(err).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}
