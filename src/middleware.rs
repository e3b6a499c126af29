//! Middleware hooks around every dispatch, and the default body budget.

use std::time::Duration;

use http::StatusCode;
use tracing::warn;

use crate::request::Request;
use crate::response::Response;

/// Hooks running around every dispatch through a
/// [`Mux`](crate::router::Mux).
///
/// `before` hooks run in registration order ahead of matching and may
/// short-circuit the request with a response of their own; `after` hooks
/// observe the successful response in reverse order, together with the
/// latency measured across the whole dispatch. A request that
/// short-circuits, or whose handler fails, skips the `after` hooks.
pub trait Middleware: Send + Sync {
    /// Runs before matching. Returning a response ends the request here.
    fn before(&self, _req: &mut Request) -> Option<Response> {
        None
    }

    /// Runs after a successful dispatch.
    fn after(&self, _req: &Request, _res: &mut Response, _latency: Duration) {}
}

/// Default request body budget: 1 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 1 << 20;

/// Rejects requests whose declared body size exceeds a byte budget.
///
/// The budget is checked against the `Content-Length` header — the router
/// never sees raw body bytes, so enforcement against the wire belongs to
/// whatever reads the socket. Installed at [`DEFAULT_BODY_LIMIT`] by every
/// [`MuxBuilder`](crate::router::MuxBuilder) unless overridden or removed.
#[derive(Debug, Clone)]
pub struct BodyLimit {
    max_bytes: usize,
}

impl BodyLimit {
    #[must_use]
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Middleware for BodyLimit {
    fn before(&self, req: &mut Request) -> Option<Response> {
        let declared = req
            .header("content-length")
            .and_then(|value| value.parse::<usize>().ok())?;
        if declared > self.max_bytes {
            warn!(
                declared,
                limit = self.max_bytes,
                path = %req.path(),
                "request body over budget"
            );
            return Some(Response::error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload too large",
            ));
        }
        None
    }
}
