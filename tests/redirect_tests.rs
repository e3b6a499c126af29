mod common;

use http::{Method, StatusCode};
use waymux::{Mux, MuxBuilder};

use common::{echo, init_tracing, request};

fn prefixed() -> MuxBuilder {
    Mux::builder()
        .prefix("api/v1/")
        .route("test", "test", echo)
        .route("test2", "test2/", echo)
}

fn status_and_location(mux: &Mux, target: &str) -> (StatusCode, Option<String>) {
    let mut req = request(Method::POST, target);
    let response = mux.serve_response(&mut req);
    let location = response.header("location").map(str::to_string);
    (response.status, location)
}

#[test]
fn both_directions_injected_by_default() {
    init_tracing();
    let mux = prefixed().build().unwrap();

    assert_eq!(status_and_location(&mux, "/api/v1/test").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test/"),
        (
            StatusCode::TEMPORARY_REDIRECT,
            Some("/api/v1/test".to_string())
        )
    );

    assert_eq!(status_and_location(&mux, "/api/v1/test2/").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test2"),
        (
            StatusCode::TEMPORARY_REDIRECT,
            Some("/api/v1/test2/".to_string())
        )
    );
}

#[test]
fn from_slash_direction_can_be_disabled() {
    let mux = prefixed().redirect_from_slash(false).build().unwrap();

    assert_eq!(status_and_location(&mux, "/api/v1/test").0, StatusCode::OK);
    // Slash-less routes still gain their slashed redirect...
    assert_eq!(
        status_and_location(&mux, "/api/v1/test/").0,
        StatusCode::TEMPORARY_REDIRECT
    );
    // ...but slash-terminated routes no longer gain a bare alias.
    assert_eq!(status_and_location(&mux, "/api/v1/test2/").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test2").0,
        StatusCode::NOT_FOUND
    );
}

#[test]
fn to_slash_direction_can_be_disabled() {
    let mux = prefixed().redirect_to_slash(false).build().unwrap();

    assert_eq!(status_and_location(&mux, "/api/v1/test").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test/").0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(status_and_location(&mux, "/api/v1/test2/").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test2").0,
        StatusCode::TEMPORARY_REDIRECT
    );
}

#[test]
fn disabling_both_directions_injects_nothing() {
    let mux = prefixed()
        .redirect_to_slash(false)
        .redirect_from_slash(false)
        .build()
        .unwrap();

    assert_eq!(status_and_location(&mux, "/api/v1/test").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test/").0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(status_and_location(&mux, "/api/v1/test2/").0, StatusCode::OK);
    assert_eq!(
        status_and_location(&mux, "/api/v1/test2").0,
        StatusCode::NOT_FOUND
    );
    assert!(mux.route("test:slash-redirect").is_none());
    assert!(mux.route("test2:slash-redirect").is_none());
}

#[test]
fn no_redirect_when_both_spellings_exist() {
    let mux = Mux::builder()
        .route("bare", "/both", echo)
        .route("slashed", "/both/", echo)
        .build()
        .unwrap();
    assert_eq!(status_and_location(&mux, "/both").0, StatusCode::OK);
    assert_eq!(status_and_location(&mux, "/both/").0, StatusCode::OK);
    assert!(mux.route("bare:slash-redirect").is_none());
    assert!(mux.route("slashed:slash-redirect").is_none());
}

#[test]
fn synthesized_routes_are_registered_by_name() {
    let mux = prefixed().build().unwrap();
    let route = mux.route("test:slash-redirect").unwrap();
    assert_eq!(route.to_string(), "/api/v1/test/");
    let route = mux.route("test2:slash-redirect").unwrap();
    assert_eq!(route.to_string(), "/api/v1/test2");
}

#[test]
fn dynamic_routes_gain_redirects_too() {
    let mux = Mux::builder()
        .route("user", "/users/[id]", echo)
        .build()
        .unwrap();
    // The synthesized pattern keeps the wildcard; the redirect target is the
    // canonical pattern text.
    assert_eq!(
        status_and_location(&mux, "/users/42/"),
        (
            StatusCode::TEMPORARY_REDIRECT,
            Some("/users/[id]".to_string())
        )
    );
}
