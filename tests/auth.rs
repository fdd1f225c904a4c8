mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{register_user, TestState};
use todoforge::auth::AUTH_HEADER;

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let state = TestState::new();
    let app = state.app().await;

    let user = register_user(&app, "a@x.com", "password1").await;
    assert_eq!(user.email, "a@x.com");
    assert!(!user.token.is_empty());

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": "a@x.com", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let login_token = resp
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-auth header on login");
    assert_ne!(login_token, user.token);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "id": user.id, "email": "a@x.com" }));

    // Both sessions are live.
    for token in [&user.token, &login_token] {
        let req = test::TestRequest::get()
            .uri("/users/me")
            .insert_header((AUTH_HEADER, token.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_rt::test]
async fn test_user_json_never_exposes_secrets() {
    let state = TestState::new();
    let app = state.app().await;
    let user = register_user(&app, "a@x.com", "password1").await;

    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header((AUTH_HEADER, user.token.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let object = body.as_object().expect("user object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["email", "id"]);
}

#[actix_rt::test]
async fn test_duplicate_registration_is_rejected() {
    let state = TestState::new();
    let app = state.app().await;
    register_user(&app, "a@x.com", "password1").await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": "a@x.com", "password": "different-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(AUTH_HEADER).is_none());
    assert_eq!(state.store.user_count().await, 1);
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let state = TestState::new();
    let app = state.app().await;

    let test_cases = vec![
        (json!({ "email": "not-an-email", "password": "password1" }), "invalid email format"),
        (json!({ "email": "a@b", "password": "password1" }), "email without domain suffix"),
        (json!({ "email": "a@x.com", "password": "1234567" }), "password too short"),
        (json!({ "password": "password1" }), "missing email"),
        (json!({ "email": "a@x.com" }), "missing password"),
        (json!({ "email": 12, "password": "password1" }), "email of wrong type"),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "Test case failed: {}",
            description
        );
    }

    assert_eq!(state.store.user_count().await, 0);
}

#[actix_rt::test]
async fn test_invalid_login_inputs_share_one_response() {
    let state = TestState::new();
    let app = state.app().await;
    register_user(&app, "a@x.com", "password1").await;

    let mut bodies = Vec::new();
    for payload in [
        json!({ "email": "a@x.com", "password": "wrong-password" }),
        json!({ "email": "nobody@x.com", "password": "password1" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().get(AUTH_HEADER).is_none());
        bodies.push(test::read_body(resp).await);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_rt::test]
async fn test_me_requires_token() {
    let state = TestState::new();
    let app = state.app().await;

    let req = test::TestRequest::get().uri("/users/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header((AUTH_HEADER, "garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_logout_revokes_only_that_token() {
    let state = TestState::new();
    let app = state.app().await;
    let user = register_user(&app, "a@x.com", "password1").await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": "a@x.com", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let other_token = resp
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-auth header on login");

    let req = test::TestRequest::delete()
        .uri("/users/me/token")
        .insert_header((AUTH_HEADER, user.token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());

    for uri in ["/users/me", "/todos"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((AUTH_HEADER, user.token.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{} after logout", uri);
    }

    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header((AUTH_HEADER, other_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_change_password() {
    let state = TestState::new();
    let app = state.app().await;
    let user = register_user(&app, "a@x.com", "password1").await;

    let req = test::TestRequest::patch()
        .uri("/users/me/password")
        .insert_header((AUTH_HEADER, user.token.as_str()))
        .set_json(json!({ "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri("/users/me/password")
        .insert_header((AUTH_HEADER, user.token.as_str()))
        .set_json(json!({ "password": "password2" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "a@x.com");

    for (password, expected) in [
        ("password1", StatusCode::BAD_REQUEST),
        ("password2", StatusCode::OK),
    ] {
        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "email": "a@x.com", "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "login with {}", password);
    }
}
