//! The routing tree vertex.
//!
//! Each node carries up to three leaf bindings — a route ending exactly
//! here, a route ending here with a trailing slash, and a catch-all rooted
//! here — plus static children behind [`Branches`] and at most one dynamic
//! child. One dynamic child suffices: a dynamic segment matches any literal
//! value, so every route passing a wildcard through this depth shares one
//! subtree.
//!
//! The tree is grown single-threaded at registration time and is immutable
//! afterwards; [`Node::match_path`] performs only reads and may run on any
//! number of request threads simultaneously.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::errors::RouteError;
use crate::route::{split_first, Route};
use crate::segment::Segment;

use super::branches::Branches;

/// Most routes bind only a handful of values; captures stay on the stack
/// up to this many.
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Capture storage filled during a match. Values are subslices of the
/// request path, in pattern order.
pub type CaptureVec<'p> = SmallVec<[&'p str; MAX_INLINE_CAPTURES]>;

#[derive(Debug, Default)]
pub(crate) struct Node {
    /// Route whose pattern ends exactly here, no trailing slash.
    exact: Option<Arc<Route>>,
    /// Route whose pattern ends here followed by `/`.
    trailing_slash: Option<Arc<Route>>,
    /// Catch-all route rooted here.
    terminal: Option<Arc<Route>>,
    /// Static children, keyed by segment text.
    branches: Option<Branches>,
    /// Shared subtree for all dynamic segments at this depth.
    dynamic: Option<Box<Node>>,
}

impl Node {
    /// Bind `route` into the tree, consuming one segment per level.
    ///
    /// A leaf slot that is already taken is an overlap: the error names both
    /// routes and both patterns so the colliding registration can be found.
    pub(crate) fn grow(
        &mut self,
        route: &Arc<Route>,
        remaining: &[Segment],
    ) -> Result<(), RouteError> {
        let Some((current, rest)) = remaining.split_first() else {
            return Self::bind(&mut self.exact, route, "static");
        };
        match current {
            Segment::TrailingSlash => Self::bind(&mut self.trailing_slash, route, "trailing slash"),
            Segment::Terminal(_) => Self::bind(&mut self.terminal, route, "terminal"),
            Segment::Static(text) => self
                .branches
                .get_or_insert_with(Branches::new)
                .grow(text)
                .grow(route, rest),
            Segment::Dynamic(_) => self
                .dynamic
                .get_or_insert_with(Box::default)
                .grow(route, rest),
        }
    }

    fn bind(
        slot: &mut Option<Arc<Route>>,
        route: &Arc<Route>,
        slot_name: &'static str,
    ) -> Result<(), RouteError> {
        if let Some(existing) = slot {
            return Err(RouteError::Overlap {
                existing: existing.name().to_string(),
                existing_pattern: existing.to_string(),
                incoming: route.name().to_string(),
                incoming_pattern: route.to_string(),
                slot: slot_name,
            });
        }
        *slot = Some(Arc::clone(route));
        Ok(())
    }

    /// Depth-first match of `path` against the subtree rooted here.
    ///
    /// Priority at every depth: static child, then dynamic child, then the
    /// catch-all leaf as last resort, so the most specific registered route
    /// always wins. Captures pushed for a dynamic descent are popped again
    /// when that subtree fails, leaving the vector consistent on every
    /// return path.
    pub(crate) fn match_path<'n, 'p>(
        &'n self,
        path: &'p str,
        captures: &mut CaptureVec<'p>,
    ) -> Option<&'n Arc<Route>> {
        if path.is_empty() {
            return self.exact.as_ref();
        }
        if path == "/" {
            return self.trailing_slash.as_ref();
        }

        // A request path is attacker-controlled input: a malformed (double
        // slash) component is a miss, not an error.
        let (head, rest) = split_first(path).ok()?;

        if let Some(branches) = &self.branches {
            if let Some(child) = branches.get(head) {
                if let Some(route) = child.match_path(rest, captures) {
                    return Some(route);
                }
            }
        }

        if let Some(dynamic) = &self.dynamic {
            captures.push(head);
            if let Some(route) = dynamic.match_path(rest, captures) {
                return Some(route);
            }
            captures.pop();
        }

        if let Some(route) = &self.terminal {
            let tail = path.strip_prefix('/').unwrap_or(path);
            // Uniform empty-component policy: a double slash anywhere in the
            // request path is a miss, including inside a catch-all capture.
            if tail.contains("//") {
                return None;
            }
            captures.push(tail);
            return Some(route);
        }

        None
    }

    /// Pre-order visit of every node in the subtree. The visitor returns
    /// `false` to abort the walk; `walk` reports whether it ran to
    /// completion.
    pub(crate) fn walk<F>(&self, visit: &mut F) -> bool
    where
        F: FnMut(&Node) -> bool,
    {
        if !visit(self) {
            return false;
        }
        if let Some(branches) = &self.branches {
            for key in branches.keys() {
                if let Some(child) = branches.get(key) {
                    if !child.walk(visit) {
                        return false;
                    }
                }
            }
        }
        if let Some(dynamic) = &self.dynamic {
            if !dynamic.walk(visit) {
                return false;
            }
        }
        true
    }

    pub(crate) fn exact_leaf(&self) -> Option<&Arc<Route>> {
        self.exact.as_ref()
    }

    pub(crate) fn trailing_slash_leaf(&self) -> Option<&Arc<Route>> {
        self.trailing_slash.as_ref()
    }
}

impl fmt::Display for Node {
    /// Indented tree dump for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(route) = &self.exact {
            write!(f, "[route:{}] ", route.name())?;
        }
        if let Some(route) = &self.trailing_slash {
            write!(f, "[route/:{}] ", route.name())?;
        }
        if let Some(route) = &self.terminal {
            write!(f, "[...:{}] ", route.name())?;
        }
        if let Some(branches) = &self.branches {
            for key in branches.keys() {
                if let Some(child) = branches.get(key) {
                    let sub = child.to_string().replace('\n', "\n    ");
                    write!(f, "\n└ <{key}> {sub}")?;
                }
            }
        }
        if let Some(dynamic) = &self.dynamic {
            let sub = dynamic.to_string().replace('\n', "\n    ");
            write!(f, "\n└ <*> {sub}")?;
        }
        Ok(())
    }
}
