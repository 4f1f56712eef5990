//! Authentication gate middleware.
//!
//! Runs the [`AuthenticationGate`](foodgate_auth::AuthenticationGate) for
//! every request and attaches the resulting principal to the request's
//! extensions. The request always continues; rejecting anonymous callers
//! is left to extractors and route guards.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use foodgate_auth::Principal;

use crate::state::AppState;

/// Binds a [`Principal`] to the request when the bearer credential is valid.
///
/// A request that already carries a principal is left untouched.
pub async fn authentication_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<Principal>().is_none() {
        let path = request.uri().path().to_owned();
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let outcome = state.gate.authenticate(&path, authorization.as_deref()).await;
        if let Some(principal) = outcome.into_principal() {
            request.extensions_mut().insert(principal);
        }
    }

    next.run(request).await
}
