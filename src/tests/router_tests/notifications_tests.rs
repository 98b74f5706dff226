use crate::errors::ServerError;
use crate::notifications::{NotificationSettings, QuietHours};
use crate::router::handle;
use crate::tests::utils::{body_string, form_body, test_app, FakeSettings};
use astra::Body;
use http::{Method, Request};
use std::collections::BTreeMap;
use std::sync::Arc;

fn get_settings_page() -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri("/notifications")
        .body(Body::empty())
        .unwrap()
}

fn post_form(body: &str) -> astra::Request {
    Request::builder()
        .method(Method::POST)
        .uri("/notifications")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body(body))
        .unwrap()
}

#[test]
fn settings_page_shows_stored_values() {
    let mut days = BTreeMap::new();
    days.insert("saturday".to_string(), true);
    days.insert("monday".to_string(), false);

    let fake = Arc::new(FakeSettings {
        stored: Some(NotificationSettings {
            email: "ops@farm.test".into(),
            enabled: true,
            cooldown_minutes: 30,
            no_notify: Some(QuietHours {
                start: "22:00".into(),
                end: "06:00".into(),
                days,
            }),
        }),
        ..FakeSettings::default()
    });
    let app = test_app(fake);

    let resp = handle(get_settings_page(), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Notification Settings"));
    assert!(body.contains(r#"value="ops@farm.test""#));
    assert!(body.contains(r#"value="30""#));
    assert!(body.contains(r#"value="22:00""#));
    assert!(body.contains(r#"<input type="checkbox" name="day" value="saturday" checked>"#));
    assert!(body.contains(r#"<input type="checkbox" name="day" value="monday">"#));
    assert!(!body.contains("Failed to load settings"));
}

#[test]
fn settings_page_offers_defaults_when_nothing_stored() {
    let app = test_app(Arc::new(FakeSettings::default()));

    let body = body_string(handle(get_settings_page(), &app).unwrap());
    assert!(body.contains(r#"value="10""#));
    assert!(body.contains(r#"value="sunday""#));
    assert!(body.contains("Sunday"));
}

#[test]
fn settings_page_still_renders_when_fetch_fails() {
    let app = test_app(Arc::new(FakeSettings {
        fail_fetch: true,
        ..FakeSettings::default()
    }));

    let resp = handle(get_settings_page(), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Failed to load settings"));
    assert!(body.contains("Save Settings"));
}

#[test]
fn saving_forwards_parsed_form() {
    let fake = Arc::new(FakeSettings::default());
    let app = test_app(Arc::clone(&fake));

    let resp = handle(
        post_form(
            "email=ops%40farm.test&enabled=on&cooldown_minutes=15\
             &quiet_enabled=on&quiet_start=21%3A30&quiet_end=07%3A00\
             &days_shown=monday&days_shown=sunday&day=sunday",
        ),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Settings Saved"));
    assert!(body.contains(r#"value="21:30""#));

    let saved = fake.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].email, "ops@farm.test");
    assert_eq!(saved[0].cooldown_minutes, 15);
    let quiet = saved[0].no_notify.as_ref().unwrap();
    assert_eq!(quiet.days.get("sunday"), Some(&true));
    assert_eq!(quiet.days.get("monday"), Some(&false));
}

#[test]
fn failed_save_keeps_form_and_warns() {
    let app = test_app(Arc::new(FakeSettings {
        fail_save: true,
        ..FakeSettings::default()
    }));

    let resp = handle(post_form("email=a%40b.test&cooldown_minutes=5"), &app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Failed to save settings"));
    assert!(body.contains(r#"value="a@b.test""#));
    assert!(!body.contains("Settings Saved"));
}

#[test]
fn invalid_cooldown_is_rejected_without_saving() {
    let fake = Arc::new(FakeSettings::default());
    let app = test_app(Arc::clone(&fake));

    let result = handle(post_form("email=a%40b.test&cooldown_minutes=0"), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
    assert!(fake.saved.lock().unwrap().is_empty());

    let page = crate::templates::html_error_response(ServerError::BadRequest("nope".into()));
    assert_eq!(page.status(), 400);
}
