use std::pin::Pin;

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use common::Error;
use models::User;
use tower::{Layer, Service};

use crate::session::Session;
use crate::{AppState, SessionId};

/// Middleware layer that only lets requests of admins through
///
/// Must be applied inside an [`AuthLayer`](super::AuthLayer)
#[derive(Clone)]
pub struct AdminLayer {
	state: AppState,
}

impl AdminLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AdminLayer {
	type Service = AdminMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AdminMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AdminMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
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
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let Some(&session_id) = req.extensions().get::<SessionId>() else {
				debug!("session id not found in request extensions");
				return Ok(Error::Forbidden.into_response());
			};

			let session = match Session::get(*session_id, &state.store).await {
				Ok(Some(s)) => s,
				Ok(None) => return Ok(Error::Forbidden.into_response()),
				Err(e) => return Ok(e.into_response()),
			};

			// Roles can change during a session, trust the stored user
			let user =
				match User::get_by_id(&session.data.user_id, &state.store).await
				{
					Ok(u) => u,
					Err(e) => return Ok(e.into_response()),
				};

			if !user.is_admin() {
				debug!("user {} is not an admin", user.id);
				return Ok(Error::Forbidden.into_response());
			}

			inner.call(req).await
		})
	}
}
