//! Error types for the two failure classes the router distinguishes.
//!
//! Registration-time errors ([`RouteError`]) are configuration mistakes and
//! are always fatal to [`build`](crate::router::MuxBuilder::build): the mux
//! refuses to come up rather than serve an ambiguous or malformed tree.
//! Request-time conditions ([`NotFound`], [`crate::params::ParamError`],
//! [`crate::method::MethodNotAllowed`], [`crate::host::UnknownHost`]) are
//! ordinary per-request outcomes carrying an HTTP status code for
//! translation at the serving boundary.

use http::StatusCode;
use thiserror::Error;

use crate::handler::HttpError;
use crate::segment::SegmentKind;

/// A registration-time failure.
///
/// Every variant indicates a mistake in the routing configuration, not in a
/// request. None of these are recoverable: the builder reports the first one
/// it encounters and the mux is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A pattern contained an empty segment definition.
    #[error("empty path segment")]
    EmptySegment,

    /// A `[` segment definition without its closing bracket.
    #[error("path segment definition {definition:?} is missing a closing bracket")]
    UnterminatedPattern {
        /// The offending segment text.
        definition: String,
    },

    /// Two consecutive separators in a registered pattern.
    ///
    /// Distinct from [`NotFound`]: a double slash in a *pattern* is a
    /// malformed registration, while a double slash in a request path is an
    /// unmatched request.
    #[error("path contains a double slash")]
    DoubleSlash,

    /// A catch-all segment was followed by something other than a trailing
    /// slash; nothing can come after a segment that consumes the remainder.
    #[error("a terminal segment is followed by a {kind} segment")]
    TerminalNotLast {
        /// Kind of the segment that followed the catch-all.
        kind: SegmentKind,
    },

    /// Two named segments in one route share a name.
    #[error("named path segment {name:?} occurs twice")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// Two routes resolve to the same tree leaf position.
    #[error(
        "routes {existing:?} and {incoming:?} overlap: \
         {existing_pattern} resolves to the same {slot} tree node as {incoming_pattern}"
    )]
    Overlap {
        /// Name of the route already bound to the leaf.
        existing: String,
        /// Pattern of the route already bound to the leaf.
        existing_pattern: String,
        /// Name of the route that failed to register.
        incoming: String,
        /// Pattern of the route that failed to register.
        incoming_pattern: String,
        /// Which leaf slot collided: `static`, `trailing slash` or `terminal`.
        slot: &'static str,
    },

    /// Reverse-path reconstruction was not given a value for a named segment.
    #[error("field set for route {route:?} does not contain field named {field:?}")]
    MissingField {
        /// Canonical pattern of the route being reconstructed.
        route: String,
        /// The field that had no bound value.
        field: String,
    },

    /// Reverse lookup was asked for a route name that was never registered.
    #[error("no route is registered under the name {name:?}")]
    UnknownRoute {
        /// The unknown route name.
        name: String,
    },

    /// Route names identify routes in reverse lookups and may not be empty.
    #[error("cannot use an empty route name")]
    EmptyRouteName,

    /// The same route name was registered twice.
    #[error("route {name:?} is already registered")]
    DuplicateRouteName {
        /// The repeated route name.
        name: String,
    },

    /// A verb slot on a [`MethodMux`](crate::method::MethodMux) was assigned twice.
    #[error("{method} handler is already set")]
    DuplicateMethodHandler {
        /// The doubly-assigned verb.
        method: http::Method,
    },

    /// A host name on a [`HostMux`](crate::host::HostMux) may not be empty.
    #[error("cannot use an empty host name")]
    EmptyHostName,

    /// The same host was registered twice on a [`HostMux`](crate::host::HostMux).
    #[error("host {host:?} already has a handler")]
    DuplicateHostHandler {
        /// The repeated host name.
        host: String,
    },

    /// A host mux with no hosts can never dispatch anything.
    #[error("empty host handler list")]
    EmptyHostList,
}

/// No registered route matched the request path.
///
/// The display text is deliberately bare: request paths are
/// attacker-controlled input and are not echoed back. The path is logged
/// with structured fields at the miss site instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("not found")]
pub struct NotFound;

impl HttpError for NotFound {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}
