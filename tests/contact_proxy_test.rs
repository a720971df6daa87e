use httpmock::prelude::*;
use lifepath_leads::{ContactProxy, HttpEvent};
use serde_json::json;

fn proxy(server: &MockServer) -> ContactProxy {
    ContactProxy::new(Some("test-key".to_string()), server.base_url())
}

#[tokio::test]
async fn test_creates_contact_then_sets_custom_fields() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/contacts")
            .header("X-Api-Key", "test-key")
            .json_body(json!({ "email": "marie@example.fr", "first_name": "Marie" }));
        then.status(201).body(r#"{"id":42}"#);
    });
    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/contacts/update-by-email")
            .header("X-Api-Key", "test-key")
            .json_body(json!({
                "email": "marie@example.fr",
                "custom_fields": {
                    "date_de_naissance": "1990-08-15",
                    "life_path_number": "6"
                }
            }));
        then.status(200).body("updated");
    });

    let body = json!({
        "email": "  marie@example.fr ",
        "firstName": "Marie",
        "birthDate": "1990-08-15",
        "lifePathNumber": 6
    });
    let response = proxy(&server).handle(HttpEvent::post(body.to_string())).await;

    create.assert();
    update.assert();
    assert_eq!(response.status_code, 200);
    let json = response.body_json();
    assert_eq!(json["create"]["status"], 201);
    assert_eq!(json["create"]["body"], r#"{"id":42}"#);
    assert_eq!(json["update"]["status"], 200);
    assert_eq!(json["update"]["body"], "updated");
}

#[tokio::test]
async fn test_create_only_without_custom_fields() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/contacts")
            .json_body(json!({ "email": "luc@example.fr" }));
        then.status(201).body("{}");
    });
    let update = server.mock(|when, then| {
        when.method(POST).path("/contacts/update-by-email");
        then.status(200);
    });

    let response = proxy(&server)
        .handle(HttpEvent::post(r#"{"email":"luc@example.fr","firstName":"  "}"#))
        .await;

    create.assert();
    update.assert_hits(0);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json()["update"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_missing_api_key_is_checked_before_email() {
    let proxy = ContactProxy::new(None, "http://127.0.0.1:9");
    let response = proxy.handle(HttpEvent::post("{}")).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body_json()["error"], "Missing SYSTEME_IO_API_KEY");
}

#[tokio::test]
async fn test_email_is_required() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/contacts");
        then.status(201);
    });

    let response = proxy(&server)
        .handle(HttpEvent::post(r#"{"email":"   ","firstName":"Marie"}"#))
        .await;

    create.assert_hits(0);
    assert_eq!(response.status_code, 400);
    assert_eq!(response.body_json()["error"], "email is required");
}

#[tokio::test]
async fn test_false_or_zero_email_is_missing() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/contacts");
        then.status(201);
    });

    for body in [r#"{"email":false}"#, r#"{"email":0,"firstName":"Marie"}"#] {
        let response = proxy(&server).handle(HttpEvent::post(body)).await;
        assert_eq!(response.status_code, 400, "body {}", body);
        assert_eq!(response.body_json()["error"], "email is required");
    }
    create.assert_hits(0);
}

#[tokio::test]
async fn test_null_body_is_500() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/contacts");
        then.status(201);
    });

    let response = proxy(&server).handle(HttpEvent::post("null")).await;

    create.assert_hits(0);
    assert_eq!(response.status_code, 500);
    assert!(response.body_json()["error"].is_string());
}

#[tokio::test]
async fn test_upstream_error_status_is_passed_through_in_body() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/contacts");
        then.status(422).body(r#"{"detail":"email already used"}"#);
    });

    let response = proxy(&server)
        .handle(HttpEvent::post(r#"{"email":"marie@example.fr"}"#))
        .await;

    create.assert();
    // 上游回應照實轉回，代理本身仍是 200
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json()["create"]["status"], 422);
}

#[tokio::test]
async fn test_transport_failure_is_500() {
    let proxy = ContactProxy::new(Some("test-key".to_string()), "http://127.0.0.1:9");
    let response = proxy
        .handle(HttpEvent::post(r#"{"email":"marie@example.fr"}"#))
        .await;

    assert_eq!(response.status_code, 500);
    assert!(response.body_json()["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_500() {
    let server = MockServer::start();
    let response = proxy(&server).handle(HttpEvent::post("{oops")).await;
    assert_eq!(response.status_code, 500);
}
