//! Middleware to authorize users and store session data on the request objects

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::RequestExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use common::{Error, LoginError, TokenError};
use models::User;
use tower::{Layer, Service};
use uuid::Uuid;

use crate::session::Session;
use crate::{AppState, SessionId};

/// Middleware layer that guarantees a request has a valid access token and
/// associated session
///
/// If a valid session is found its ID is stored as an
/// [`Extension`](axum::Extension)
///
/// This function does not extract any session data, controllers that need this
/// data should ask for a [`Session`] in their arguments
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let Ok(jar) =
				req.extract_parts_with_state::<PrivateCookieJar, _>(&state).await;

			let session_id = jar
				.get(&state.config.access_cookie_name)
				.and_then(|c| c.value().parse::<Uuid>().ok());

			let Some(session_id) = session_id else {
				info!("got request without valid access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let session = match Session::get(session_id, &state.store).await {
				Ok(s) => s,
				Err(e) => return Ok(e.into_response()),
			};

			let Some(session) = session else {
				warn!("attempted to authorize unknown session {session_id}");

				return Ok(
					Error::from(TokenError::MissingSession).into_response()
				);
			};

			// Deactivating an account ends all of its sessions
			let user =
				match User::get_by_id(&session.data.user_id, &state.store).await
				{
					Ok(u) => u,
					Err(e) => return Ok(e.into_response()),
				};

			if !user.is_active {
				warn!("revoking session {session_id} of inactive user {}", user.id);

				if let Err(e) = Session::delete(session_id, &state.store).await {
					return Ok(e.into_response());
				}

				return Ok(Error::from(LoginError::Disabled).into_response());
			}

			req.extensions_mut().insert(SessionId(session_id));

			inner.call(req).await
		})
	}
}
