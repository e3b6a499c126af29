#![allow(dead_code)] // each test binary uses its own subset of these helpers

use std::collections::HashMap;

use http::{Method, StatusCode};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use waymux::{BoxHttpError, Request, Response};

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Handler echoing the request path back, the way a real handler would
/// confirm which route it was reached through.
pub fn echo(req: &mut Request) -> Result<Response, BoxHttpError> {
    Ok(Response::json(StatusCode::OK, json!({ "path": req.path() })))
}

/// A bodyless request with the given method and target.
pub fn request(method: Method, target: &str) -> Request {
    Request::new(method, target, HashMap::new(), None)
}
