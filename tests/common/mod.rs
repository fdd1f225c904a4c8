#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use todoforge::auth::{TokenService, UserDirectory, AUTH_HEADER};
use todoforge::routes;
use todoforge::store::MemoryStore;
use todoforge::tasks::TaskRepository;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Shared services for one test, all backed by the same in-memory store.
pub struct TestState {
    pub store: Arc<MemoryStore>,
    pub directory: web::Data<UserDirectory>,
    pub tasks: web::Data<TaskRepository>,
}

impl TestState {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let directory = web::Data::new(UserDirectory::new(
            store.clone(),
            TokenService::new(TEST_SECRET),
            4,
        ));
        let tasks = web::Data::new(TaskRepository::new(store.clone()));
        Self {
            store,
            directory,
            tasks,
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(self.directory.clone())
                .app_data(self.tasks.clone())
                .configure(routes::config),
        )
        .await
    }
}

/// A registered user and the token handed back at registration.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

pub async fn register_user(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "registration of {} failed", email);

    let token = resp
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("x-auth header on registration")
        .to_string();
    let body: Value = test::read_body_json(resp).await;

    TestUser {
        id: body["id"].as_str().expect("id in body").to_string(),
        email: body["email"].as_str().expect("email in body").to_string(),
        token,
    }
}

pub async fn create_todo(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    text: &str,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header((AUTH_HEADER, token))
        .set_json(json!({ "text": text }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "creating todo {:?} failed", text);
    test::read_body_json(resp).await
}
