//! # waymux
//!
//! **waymux** is a tree-based HTTP request router: you register named path
//! patterns once, and it resolves every incoming request path to the single
//! matching route — plus the values bound to its wildcard segments — with a
//! read-only tree walk that is safe for unbounded concurrent lookups.
//!
//! ## Pattern language
//!
//! Patterns are `/`-delimited. A literal component matches itself; `[name]`
//! matches any single non-empty component and captures it; `[...name]`
//! captures everything remaining, separators included; a trailing `/` is
//! significant and matches only slash-terminated paths. Two patterns that
//! would resolve to the same tree position are a *registration* error, never
//! a runtime ambiguity, and at match time a static component always beats a
//! wildcard at the same depth, with catch-alls matching last.
//!
//! ## Architecture
//!
//! - [`segment`] — classification of one pattern component
//! - [`route`] — named segment sequences and reverse-path reconstruction
//! - [`router`] — the routing tree, the multiplexer and its builder
//! - [`params`] — typed access to captured path fields
//! - [`request`] / [`response`] — the boundary value types handlers see
//! - [`handler`] — the handler contract and error-to-status translation
//! - [`middleware`] — before/after hooks and the default body budget
//! - [`method`] / [`host`] — verb- and host-based sub-multiplexing
//! - [`redirect`] — the fixed-location handler behind slash redirects
//! - [`errors`] — registration-time vs request-time failure types
//!
//! Registration is single-threaded and finishes before serving begins;
//! [`MuxBuilder::build`](router::MuxBuilder::build) consumes the builder
//! and hands back an immutable [`Mux`](router::Mux) that can be shared via
//! `Arc` with zero synchronization on the match path.
//!
//! ## Example
//!
//! ```
//! use http::StatusCode;
//! use serde_json::json;
//! use waymux::{BoxHttpError, Mux, Request, Response};
//!
//! fn list_items(_req: &mut Request) -> Result<Response, BoxHttpError> {
//!     Ok(Response::json(StatusCode::OK, json!({ "items": [] })))
//! }
//!
//! fn get_item(req: &mut Request) -> Result<Response, BoxHttpError> {
//!     let params = req.params().expect("routed request");
//!     let id = params.uint("id")?;
//!     Ok(Response::json(StatusCode::OK, json!({ "id": id })))
//! }
//!
//! fn main() -> Result<(), waymux::RouteError> {
//!     let mux = Mux::builder()
//!         .route("list-items", "/items", list_items)
//!         .route("get-item", "/items/[id]", get_item)
//!         .build()?;
//!
//!     let mut req = Request::get("/items/42");
//!     let response = mux.serve_response(&mut req);
//!     assert_eq!(response.status, StatusCode::OK);
//!     assert_eq!(response.body["id"], 42);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod handler;
pub mod host;
pub mod method;
pub mod middleware;
pub mod params;
pub mod redirect;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod segment;

pub use errors::{NotFound, RouteError};
pub use handler::{error_response, BoxHttpError, Handler, HttpError};
pub use host::{HostMux, HostMuxBuilder, UnknownHost};
pub use method::{MethodMux, MethodMuxBuilder, MethodNotAllowed};
pub use middleware::{BodyLimit, Middleware, DEFAULT_BODY_LIMIT};
pub use params::{ParamError, PathParams};
pub use redirect::Redirect;
pub use request::{Request, RoutingContext};
pub use response::{HeaderVec, Response, MAX_INLINE_HEADERS};
pub use route::Route;
pub use router::{CaptureVec, Mux, MuxBuilder, RouteMatch, MAX_INLINE_CAPTURES};
pub use segment::{Segment, SegmentKind};
