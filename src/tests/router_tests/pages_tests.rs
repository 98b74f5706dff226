use crate::errors::ServerError;
use crate::router::{handle, respond};
use crate::tests::utils::{body_string, test_app, FakeSettings};
use astra::Body;
use http::{Method, Request};
use std::sync::Arc;

fn get(path: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn home_page_loads() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let resp = handle(get("/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("ClearDrops: Real-time Water Quality Monitoring"));
    assert!(body.contains(r#"href="/monitor""#));
    assert!(body.contains("<!DOCTYPE html>"));
}

#[test]
fn educational_page_covers_every_parameter() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let resp = handle(get("/educational"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    for heading in ["Temperature", "TDS (Total Dissolved Solids)", "pH", "Turbidity"] {
        assert!(body.contains(heading), "missing {heading}");
    }
    assert!(body.contains("Leafy Greens"));
    assert!(body.contains("System Methodology"));
}

#[test]
fn nav_marks_current_page() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let body = body_string(handle(get("/educational"), &app).unwrap());
    assert!(body.contains(r#"<a href="/educational" class="active">"#));
    assert!(!body.contains(r#"<a href="/" class="active">"#));
}

#[test]
fn stylesheet_is_served_as_css() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let resp = handle(get("/static/main.css"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").and_then(|v| v.to_str().ok()),
        Some("text/css; charset=utf-8")
    );
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let result = handle(get("/no-such-page"), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));

    let page = crate::templates::html_error_response(ServerError::NotFound);
    assert_eq!(page.status(), 404);
    assert!(body_string(page).contains("Not Found"));
}

#[test]
fn wrong_method_is_not_found() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/monitor")
        .body(Body::empty())
        .unwrap();

    assert!(matches!(handle(req, &app), Err(ServerError::NotFound)));
}

#[test]
fn respond_renders_error_pages() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let missing = respond(get("/no-such-page"), &app);
    assert_eq!(missing.status(), 404);
    assert!(body_string(missing).contains("Not Found"));

    let home = respond(get("/"), &app);
    assert_eq!(home.status(), 200);
}
