//! Registration: accumulates routes and finalizes the immutable [`Mux`].
//!
//! All configuration errors surface from [`MuxBuilder::build`]; the mux
//! refuses to come up rather than serve a malformed or ambiguous tree.
//! `build` consumes the builder, which is what makes "no registration after
//! serving begins" unrepresentable rather than merely documented.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::RouteError;
use crate::handler::Handler;
use crate::middleware::{BodyLimit, Middleware, DEFAULT_BODY_LIMIT};
use crate::redirect::Redirect;
use crate::route::Route;

use super::core::{Mux, RouteKey};
use super::node::Node;

type HandlerTable = HashMap<RouteKey, Box<dyn Handler>>;
type RouteTable = HashMap<String, Arc<Route>>;

/// Builder for a [`Mux`].
///
/// Registrations are validated in order when [`build`](Self::build) runs.
/// By default a 1 MiB request body budget is enforced and both directions
/// of trailing-slash redirect injection are enabled.
pub struct MuxBuilder {
    prefix: String,
    redirect_to_slash: bool,
    redirect_from_slash: bool,
    body_limit: Option<usize>,
    middleware: Vec<Arc<dyn Middleware>>,
    pending: Vec<(String, String, Box<dyn Handler>)>,
}

impl MuxBuilder {
    pub(crate) fn new() -> Self {
        Self {
            prefix: String::new(),
            redirect_to_slash: true,
            redirect_from_slash: true,
            body_limit: Some(DEFAULT_BODY_LIMIT),
            middleware: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Prepend `prefix` to every registered pattern, e.g. `"api/v1/"`.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Register `handler` under a unique route `name` for `pattern`.
    #[must_use]
    pub fn route(
        mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        handler: impl Handler + 'static,
    ) -> Self {
        self.pending
            .push((name.into(), pattern.into(), Box::new(handler)));
        self
    }

    /// Append a middleware; `before` hooks run in registration order,
    /// `after` hooks in reverse.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Replace the default 1 MiB request body budget.
    #[must_use]
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = Some(bytes);
        self
    }

    /// Remove the request body budget entirely.
    #[must_use]
    pub fn no_body_limit(mut self) -> Self {
        self.body_limit = None;
        self
    }

    /// Synthesize `…/` → `…` redirects for slash-less routes (default on).
    #[must_use]
    pub fn redirect_to_slash(mut self, enabled: bool) -> Self {
        self.redirect_to_slash = enabled;
        self
    }

    /// Synthesize `…` → `…/` redirects for slash-terminated routes
    /// (default on).
    #[must_use]
    pub fn redirect_from_slash(mut self, enabled: bool) -> Self {
        self.redirect_from_slash = enabled;
        self
    }

    /// Validate every registration, grow the tree, inject redirects and
    /// finalize the mux.
    pub fn build(self) -> Result<Mux, RouteError> {
        let mut tree = Node::default();
        let mut handlers: HandlerTable = HashMap::with_capacity(self.pending.len());
        let mut routes: RouteTable = HashMap::with_capacity(self.pending.len());

        for (name, pattern, handler) in self.pending {
            let pattern = format!("{}{}", self.prefix, pattern);
            register(&mut tree, &mut handlers, &mut routes, name, &pattern, handler)?;
        }

        inject_slash_redirects(
            &mut tree,
            &mut handlers,
            &mut routes,
            self.redirect_to_slash,
            self.redirect_from_slash,
        )?;

        let mut middleware = self.middleware;
        if let Some(limit) = self.body_limit {
            middleware.insert(0, Arc::new(BodyLimit::new(limit)));
        }

        info!(route_count = routes.len(), "routing table built");
        Ok(Mux {
            tree,
            handlers,
            routes: Arc::new(routes),
            middleware,
        })
    }
}

fn register(
    tree: &mut Node,
    handlers: &mut HandlerTable,
    routes: &mut RouteTable,
    name: String,
    pattern: &str,
    handler: Box<dyn Handler>,
) -> Result<(), RouteError> {
    if name.is_empty() {
        return Err(RouteError::EmptyRouteName);
    }
    if routes.contains_key(&name) {
        return Err(RouteError::DuplicateRouteName { name });
    }
    let route = Arc::new(Route::new(name.clone(), pattern)?);
    tree.grow(&route, route.segments())?;
    debug!(route = %name, pattern = %route, "route registered");
    routes.insert(name, Arc::clone(&route));
    handlers.insert(RouteKey(route), handler);
    Ok(())
}

/// One post-registration pass over the finished tree, synthesizing a
/// temporary-redirect route wherever only one slash spelling of a path is
/// registered.
///
/// The walk only collects; registration happens afterwards, so the walk
/// never visits nodes it is itself creating.
fn inject_slash_redirects(
    tree: &mut Node,
    handlers: &mut HandlerTable,
    routes: &mut RouteTable,
    to_slash: bool,
    from_slash: bool,
) -> Result<(), RouteError> {
    if !to_slash && !from_slash {
        return Ok(());
    }

    let mut synthesized: Vec<(String, String, String)> = Vec::new();
    tree.walk(&mut |node| {
        if to_slash {
            if let (Some(route), None) = (node.exact_leaf(), node.trailing_slash_leaf()) {
                let target = route.to_string();
                synthesized.push((
                    format!("{}:slash-redirect", route.name()),
                    format!("{target}/"),
                    target,
                ));
            }
        }
        if from_slash {
            if let (Some(route), None) = (node.trailing_slash_leaf(), node.exact_leaf()) {
                let target = route.to_string();
                let stripped = target[..target.len() - 1].to_string();
                synthesized.push((
                    format!("{}:slash-redirect", route.name()),
                    stripped,
                    target,
                ));
            }
        }
        true
    });

    for (name, pattern, target) in synthesized {
        debug!(route = %name, pattern = %pattern, target = %target, "slash redirect injected");
        register(
            tree,
            handlers,
            routes,
            name,
            &pattern,
            Box::new(Redirect::temporary(target)),
        )?;
    }
    Ok(())
}
