//! Parsed request data handed to handlers, plus the routing context the mux
//! installs once a path has matched.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;

use crate::errors::RouteError;
use crate::params::PathParams;
use crate::route::Route;
use crate::router::MAX_INLINE_CAPTURES;

/// Routing state for one matched request: the route, its captured values,
/// and a shared view of the route table for reverse lookups.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    matched: Arc<Route>,
    captures: SmallVec<[String; MAX_INLINE_CAPTURES]>,
    routes: Arc<HashMap<String, Arc<Route>>>,
}

impl RoutingContext {
    pub(crate) fn new(
        matched: Arc<Route>,
        captures: SmallVec<[String; MAX_INLINE_CAPTURES]>,
        routes: Arc<HashMap<String, Arc<Route>>>,
    ) -> Self {
        Self {
            matched,
            captures,
            routes,
        }
    }

    /// The route this request matched.
    #[must_use]
    pub fn matched(&self) -> &Arc<Route> {
        &self.matched
    }

    /// Captured values in pattern order.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Name→value view of the captured fields with typed accessors.
    #[must_use]
    pub fn params(&self) -> PathParams {
        PathParams::new(Arc::clone(&self.matched), &self.captures)
    }

    /// Reconstruct the path of any registered route, e.g. to build links or
    /// redirect targets from inside a handler.
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
}

/// One parsed HTTP request.
///
/// Header names are lowercased at construction; cookies and query
/// parameters are split out eagerly. The body, when present, is an
/// already-parsed JSON value — how bytes got decoded into it is the serving
/// layer's concern, not the router's.
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
    query_params: HashMap<String, String>,
    body: Option<serde_json::Value>,
    routing: Option<RoutingContext>,
}

impl Request {
    /// Build a request from raw parts. `target` may carry a query string,
    /// which is split off and URL-decoded.
    #[must_use]
    pub fn new(
        method: Method,
        target: &str,
        headers: HashMap<String, String>,
        body: Option<serde_json::Value>,
    ) -> Self {
        let path = target.split('?').next().unwrap_or(target).to_string();
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        let cookies = parse_cookies(&headers);
        let query_params = parse_query_params(target);
        Self {
            method,
            path,
            headers,
            cookies,
            query_params,
            body,
            routing: None,
        }
    }

    /// Shorthand for a bodyless GET with no headers.
    #[must_use]
    pub fn get(target: &str) -> Self {
        Self::new(Method::GET, target, HashMap::new(), None)
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path with any query string already stripped.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Header lookup, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The `Host` header with any port stripped.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        let raw = self.header("host")?;
        if let Some(rest) = raw.strip_prefix('[') {
            // Bracketed IPv6 literal; the name is the bracket contents.
            return rest.split(']').next();
        }
        raw.split(':').next()
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Routing state, present once the mux has matched this request.
    #[must_use]
    pub fn routing(&self) -> Option<&RoutingContext> {
        self.routing.as_ref()
    }

    /// Typed view of the captured path fields, if this request was routed.
    #[must_use]
    pub fn params(&self) -> Option<PathParams> {
        self.routing.as_ref().map(RoutingContext::params)
    }

    pub(crate) fn set_routing(&mut self, routing: RoutingContext) {
        self.routing = Some(routing);
    }
}

/// Parse query parameters from everything after `?`, URL-decoded.
#[must_use]
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    match target.find('?') {
        Some(pos) => url::form_urlencoded::parse(target[pos + 1..].as_bytes())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        None => HashMap::new(),
    }
}

/// Split the `cookie` header into name/value pairs.
#[must_use]
pub fn parse_cookies(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .get("cookie")
        .map(|raw| {
            raw.split(';')
                .filter_map(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    let name = parts.next()?.trim().to_string();
                    let value = parts.next().unwrap_or("").trim().to_string();
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_query_string_off_the_path() {
        let req = Request::get("/users?limit=10&offset=20");
        assert_eq!(req.path(), "/users");
        assert_eq!(req.query_param("limit"), Some("10"));
        assert_eq!(req.query_param("offset"), Some("20"));
        assert_eq!(req.query_param("missing"), None);
    }

    #[test]
    fn decodes_query_values() {
        let req = Request::get("/search?q=a%20b+c");
        assert_eq!(req.query_param("q"), Some("a b c"));
    }

    #[test]
    fn headers_are_case_insensitive() {
        let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        let req = Request::new(Method::POST, "/x", headers, None);
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn parses_cookies() {
        let headers = HashMap::from([(
            "cookie".to_string(),
            "session=abc; theme=dark; bare".to_string(),
        )]);
        let req = Request::new(Method::GET, "/", headers, None);
        assert_eq!(req.cookie("session"), Some("abc"));
        assert_eq!(req.cookie("theme"), Some("dark"));
        assert_eq!(req.cookie("bare"), Some(""));
    }

    #[test]
    fn strips_the_host_port() {
        let headers = HashMap::from([("host".to_string(), "example.com:8080".to_string())]);
        let req = Request::new(Method::GET, "/", headers, None);
        assert_eq!(req.host(), Some("example.com"));

        let headers = HashMap::from([("host".to_string(), "[::1]:8080".to_string())]);
        let req = Request::new(Method::GET, "/", headers, None);
        assert_eq!(req.host(), Some("::1"));
    }
}
