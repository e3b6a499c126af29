mod common;

use std::collections::HashMap;

use http::{Method, StatusCode};
use serde_json::json;
use waymux::{
    error_response, BoxHttpError, Handler, HostMux, MethodMux, Mux, Request, Response, RouteError,
};

use common::{echo, request};

fn tagged(tag: &'static str) -> impl Fn(&mut Request) -> Result<Response, BoxHttpError> {
    move |_req: &mut Request| Ok(Response::json(StatusCode::OK, json!({ "via": tag })))
}

fn serve(handler: &dyn Handler, req: &mut Request) -> Response {
    match handler.serve(req) {
        Ok(response) => response,
        Err(error) => error_response(error.as_ref()),
    }
}

#[test]
fn dispatches_by_method() {
    let mux = MethodMux::builder()
        .get(tagged("get"))
        .post(tagged("post"))
        .build()
        .unwrap();

    let mut req = request(Method::GET, "/x");
    assert_eq!(serve(&mux, &mut req).body["via"], "get");

    let mut req = request(Method::POST, "/x");
    assert_eq!(serve(&mux, &mut req).body["via"], "post");
}

#[test]
fn head_is_served_by_the_get_handler() {
    let mux = MethodMux::builder().get(tagged("get")).build().unwrap();
    let mut req = request(Method::HEAD, "/x");
    assert_eq!(serve(&mux, &mut req).body["via"], "get");
}

#[test]
fn missing_verbs_are_method_not_allowed() {
    let mux = MethodMux::builder().get(tagged("get")).build().unwrap();
    for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
        let mut req = request(method.clone(), "/x");
        assert_eq!(
            serve(&mux, &mut req).status,
            StatusCode::METHOD_NOT_ALLOWED,
            "for {method}"
        );
    }
}

#[test]
fn options_reports_the_allow_set() {
    let mux = MethodMux::builder()
        .get(tagged("get"))
        .delete(tagged("delete"))
        .build()
        .unwrap();
    let mut req = request(Method::OPTIONS, "/x");
    let response = serve(&mux, &mut req);
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("allow"), Some("OPTIONS,GET,HEAD,DELETE"));
}

#[test]
fn duplicate_verbs_fail_the_build() {
    let err = MethodMux::builder()
        .put(tagged("one"))
        .put(tagged("two"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::DuplicateMethodHandler {
            method: Method::PUT
        }
    );
}

fn host_request(host: &str, target: &str) -> Request {
    let headers = HashMap::from([("host".to_string(), host.to_string())]);
    Request::new(Method::GET, target, headers, None)
}

#[test]
fn dispatches_by_host() {
    let mux = HostMux::builder()
        .host("api.example.com", tagged("api"))
        .host("www.example.com", tagged("www"))
        .build()
        .unwrap();

    let mut req = host_request("api.example.com", "/");
    assert_eq!(serve(&mux, &mut req).body["via"], "api");

    let mut req = host_request("www.example.com:8080", "/");
    assert_eq!(serve(&mux, &mut req).body["via"], "www");

    let mut req = host_request("other.example.com", "/");
    assert_eq!(serve(&mux, &mut req).status, StatusCode::NOT_FOUND);
}

#[test]
fn map_form_behaves_like_list_form() {
    // Nine hosts pushes the lookup into map form; behavior must not change.
    let mut builder = HostMux::builder();
    for i in 0..9 {
        builder = builder.host(format!("host-{i}.example.com"), tagged("many"));
    }
    let mux = builder.build().unwrap();
    for i in 0..9 {
        let mut req = host_request(&format!("host-{i}.example.com"), "/");
        assert_eq!(serve(&mux, &mut req).body["via"], "many");
    }
    let mut req = host_request("host-9.example.com", "/");
    assert_eq!(serve(&mux, &mut req).status, StatusCode::NOT_FOUND);
}

#[test]
fn host_registration_is_validated() {
    assert_eq!(
        HostMux::builder().build().unwrap_err(),
        RouteError::EmptyHostList
    );
    assert_eq!(
        HostMux::builder().host("", tagged("x")).build().unwrap_err(),
        RouteError::EmptyHostName
    );
    assert_eq!(
        HostMux::builder()
            .host("a.example.com", tagged("one"))
            .host("a.example.com", tagged("two"))
            .build()
            .unwrap_err(),
        RouteError::DuplicateHostHandler {
            host: "a.example.com".to_string()
        }
    );
}

#[test]
fn muxes_nest() {
    // Host mux on the outside, path mux per host: the shape a small
    // multi-tenant service actually uses.
    let api = Mux::builder().route("health", "/healthz", echo).build().unwrap();
    let mux = HostMux::builder().host("api.example.com", api).build().unwrap();

    let mut req = host_request("api.example.com", "/healthz");
    let response = serve(&mux, &mut req);
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["path"], "/healthz");
}
