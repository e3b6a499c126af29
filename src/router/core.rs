//! The multiplexer: the finished routing tree plus its handler table.
//!
//! A [`Mux`] is built once by [`MuxBuilder`](super::MuxBuilder), is
//! immutable from then on, and is `Send + Sync`: wrap it in an `Arc` and
//! match from as many request threads as you like with no coordination.
//!
//! Handlers are keyed by route *identity*, not pattern value: every
//! registration produces its own `Arc<Route>`, so equal-looking patterns
//! registered under different names stay independent entries.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, error, warn};

use crate::errors::{NotFound, RouteError};
use crate::handler::{error_response, BoxHttpError, Handler};
use crate::middleware::Middleware;
use crate::request::{Request, RoutingContext};
use crate::response::Response;
use crate::route::Route;

use super::node::{CaptureVec, Node, MAX_INLINE_CAPTURES};

/// Handler-table key comparing routes by pointer identity.
pub(crate) struct RouteKey(pub(crate) Arc<Route>);

impl PartialEq for RouteKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RouteKey {}

impl Hash for RouteKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteKey({})", self.0.name())
    }
}

/// A successful path match: the route and its captured values.
///
/// Captures are borrowed subslices of the request path, in pattern order:
/// one per dynamic segment, plus the claimed remainder when a catch-all
/// matched.
#[derive(Debug, Clone)]
pub struct RouteMatch<'p> {
    /// The matched route.
    pub route: Arc<Route>,
    /// Captured values, in pattern order.
    pub captures: CaptureVec<'p>,
}

/// The request multiplexer.
pub struct Mux {
    pub(crate) tree: Node,
    pub(crate) handlers: HashMap<RouteKey, Box<dyn Handler>>,
    /// Shared with request-scoped contexts for reverse path lookups.
    pub(crate) routes: Arc<HashMap<String, Arc<Route>>>,
    pub(crate) middleware: Vec<Arc<dyn Middleware>>,
}

impl Mux {
    /// Start a new registration.
    #[must_use]
    pub fn builder() -> super::MuxBuilder {
        super::MuxBuilder::new()
    }

    /// Walk the tree for `path` without dispatching.
    ///
    /// Pure and bounded by the path length; safe for unbounded concurrent
    /// calls.
    #[must_use]
    pub fn match_path<'p>(&self, path: &'p str) -> Option<RouteMatch<'p>> {
        let mut captures = CaptureVec::new();
        let route = self.tree.match_path(path, &mut captures)?;
        Some(RouteMatch {
            route: Arc::clone(route),
            captures,
        })
    }

    /// Look up a registered route by name.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Arc<Route>> {
        self.routes.get(name)
    }

    /// Reconstruct the literal path of the named route with bound values.
    pub fn path_for(
        &self,
        name: &str,
        fields: &HashMap<String, String>,
    ) -> Result<String, RouteError> {
        match self.routes.get(name) {
            Some(route) => route.path(fields),
            None => Err(RouteError::UnknownRoute {
                name: name.to_string(),
            }),
        }
    }

    /// Serve and translate any error into a response at the boundary.
    pub fn serve_response(&self, req: &mut Request) -> Response {
        match Handler::serve(self, req) {
            Ok(response) => response,
            Err(error) => error_response(error.as_ref()),
        }
    }

    fn dispatch(&self, req: &mut Request) -> Result<Response, BoxHttpError> {
        let (route, captures) = {
            let mut raw = CaptureVec::new();
            match self.tree.match_path(req.path(), &mut raw) {
                Some(route) => {
                    let owned: SmallVec<[String; MAX_INLINE_CAPTURES]> =
                        raw.iter().map(|value| (*value).to_string()).collect();
                    (Arc::clone(route), owned)
                }
                None => {
                    warn!(method = %req.method(), path = %req.path(), "no route matched");
                    return Err(Box::new(NotFound));
                }
            }
        };

        let Some(handler) = self.handlers.get(&RouteKey(Arc::clone(&route))) else {
            // Every route grown into the tree gets a handler entry at build
            // time; reaching this arm is a bug in the mux itself.
            error!(route = %route.name(), "matched route has no handler entry");
            return Err(Box::new(NotFound));
        };

        debug!(
            method = %req.method(),
            path = %req.path(),
            route = %route.name(),
            captures = captures.len(),
            "route matched"
        );
        req.set_routing(RoutingContext::new(
            route,
            captures,
            Arc::clone(&self.routes),
        ));
        handler.serve(req)
    }
}

impl Handler for Mux {
    /// Match the request path and dispatch to the bound handler.
    ///
    /// Middleware `before` hooks run first, in registration order, and may
    /// short-circuit; `after` hooks observe the successful response in
    /// reverse order with the measured latency. No match is a [`NotFound`].
    fn serve(&self, req: &mut Request) -> Result<Response, BoxHttpError> {
        let started = Instant::now();
        for middleware in &self.middleware {
            if let Some(response) = middleware.before(req) {
                return Ok(response);
            }
        }
        let mut response = self.dispatch(req)?;
        for middleware in self.middleware.iter().rev() {
            middleware.after(req, &mut response, started.elapsed());
        }
        Ok(response)
    }
}

impl fmt::Display for Mux {
    /// The routing tree, one node per line, for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

impl fmt::Debug for Mux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mux")
            .field("routes", &self.routes.len())
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}
