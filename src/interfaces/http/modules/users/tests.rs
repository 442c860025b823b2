use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::application::{SharedUserService, UserService};
use crate::domain::{User, UserId, UserRepositoryInterface};
use crate::infrastructure::InMemoryUserRepository;
use crate::interfaces::http::create_api_router;
use crate::shared::{InfraError, InfraResult};

fn router_with(repo: Arc<dyn UserRepositoryInterface>) -> Router {
    let service: SharedUserService = Arc::new(UserService::new(repo));
    let handle = PrometheusBuilder::new().build_recorder().handle();
    create_api_router(service, None, handle)
}

fn app() -> Router {
    router_with(Arc::new(InMemoryUserRepository::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn alice() -> Value {
    json!({"firstName": "Alice", "lastName": "Smith", "contactNumber": "+1 555 123 4567"})
}

#[tokio::test]
async fn create_returns_user_with_id() {
    let app = app();
    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["firstName"], "Alice");
    assert_eq!(body["lastName"], "Smith");
    assert_eq!(body["contactNumber"], "+1 555 123 4567");
}

#[tokio::test]
async fn create_ignores_client_id() {
    let app = app();
    let mut payload = alice();
    payload["id"] = json!(99);
    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn create_with_bad_contact_is_400() {
    let app = app();
    let payload = json!({"firstName": "Bob", "lastName": "Jones", "contactNumber": "abc"});
    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to create user");
    assert_eq!(body["error"], "Invalid phone number format for user.");
}

#[tokio::test]
async fn create_duplicate_name_pair_is_400() {
    let app = app();
    send_json(&app, Method::POST, "/api/users", Some(alice())).await;
    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to create user");
    assert_eq!(
        body["error"],
        "User with the same first name and last name already exists."
    );
}

#[tokio::test]
async fn get_existing_and_missing() {
    let app = app();
    send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    let (status, body) = send_json(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Alice");

    let (status, body) = send_json(&app, Method::GET, "/api/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User with ID 42 not found."}));
}

#[tokio::test]
async fn non_numeric_id_is_404() {
    let app = app();
    let (status, body) = send_json(&app, Method::GET, "/api/users/abc", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User with ID abc not found.");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    let payload = json!({"firstName": "Alice", "lastName": "Brown", "contactNumber": "0821234567"});
    let (status, body) = send_json(&app, Method::PUT, "/api/users/1", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully updated user with ID 1");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["lastName"], "Brown");
    assert_eq!(body["data"]["contactNumber"], "0821234567");

    let (_, fetched) = send_json(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(fetched["lastName"], "Brown");
}

#[tokio::test]
async fn update_missing_user_is_404() {
    let app = app();
    let (status, body) = send_json(&app, Method::PUT, "/api/users/7", Some(alice())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to update user with ID '7'");
    assert_eq!(body["error"], "User with ID 7 not found.");
}

#[tokio::test]
async fn update_with_bad_contact_is_400() {
    let app = app();
    send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    let payload = json!({"firstName": "Alice", "lastName": "Smith", "contactNumber": "12"});
    let (status, body) = send_json(&app, Method::PUT, "/api/users/1", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update user with ID '1'");
    assert_eq!(body["error"], "Invalid phone number format for user.");
}

#[tokio::test]
async fn update_with_mismatched_body_id_is_400() {
    let app = app();
    send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    let mut payload = alice();
    payload["id"] = json!(2);
    let (status, body) = send_json(&app, Method::PUT, "/api/users/1", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID in request body does not match path.");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app();
    send_json(&app, Method::POST, "/api/users", Some(alice())).await;

    let (status, body) = send_json(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Successfully deleted user with ID '1'"}));

    let (status, _) = send_json(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_json(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete user with ID '1'");
    assert_eq!(body["error"], "User with ID 1 not found.");
}

#[tokio::test]
async fn full_lifecycle() {
    let app = app();

    let (status, created) = send_json(&app, Method::POST, "/api/users", Some(alice())).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/users/{}", id);

    let payload = json!({"id": id, "firstName": "Alice", "lastName": "Smith", "contactNumber": "(021) 555-0199"});
    let (status, _) = send_json(&app, Method::PUT, &uri, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["contactNumber"], "(021) 555-0199");

    let (status, _) = send_json(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    // The freed name pair can be taken again.
    let (status, recreated) = send_json(&app, Method::POST, "/api/users", Some(alice())).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(recreated["id"], created["id"]);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overlong_first_name_is_422() {
    let app = app();
    let payload = json!({"firstName": "x".repeat(256), "lastName": "Smith", "contactNumber": "0821234567"});
    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = app();
    let request = Request::builder()
        .uri("/api/users/1")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me");
}

/// Store whose lookups fail outright and whose reads may panic.
struct FaultyLookups {
    panic_on_find: bool,
}

#[async_trait]
impl UserRepositoryInterface for FaultyLookups {
    async fn save(&self, user: User) -> InfraResult<User> {
        Ok(user)
    }

    async fn find_by_id(&self, _id: UserId) -> InfraResult<Option<User>> {
        if self.panic_on_find {
            panic!("store exploded");
        }
        Err(InfraError::Storage("connection reset".into()))
    }

    async fn exists_by_id(&self, _id: UserId) -> InfraResult<bool> {
        Err(InfraError::Storage("connection reset".into()))
    }

    async fn exists_by_name_pair(&self, _first: &str, _last: &str) -> InfraResult<bool> {
        Err(InfraError::Storage("connection reset".into()))
    }

    async fn count(&self) -> InfraResult<u64> {
        Ok(0)
    }

    async fn delete_by_id(&self, _id: UserId) -> InfraResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn unclassified_fault_is_plain_text_500() {
    let app = router_with(Arc::new(FaultyLookups { panic_on_find: false }));
    let response = app
        .oneshot(Request::builder().uri("/api/users/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Storage error: connection reset");
}

#[tokio::test]
async fn unclassified_fault_on_create_is_plain_text_500() {
    let app = router_with(Arc::new(FaultyLookups { panic_on_find: false }));
    let (status, bytes) = send(&app, Method::POST, "/api/users", Some(alice())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(bytes, b"Storage error: connection reset");
}

#[tokio::test]
async fn handler_panic_is_plain_text_500() {
    let app = router_with(Arc::new(FaultyLookups { panic_on_find: true }));
    let (status, bytes) = send(&app, Method::GET, "/api/users/1", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(bytes, b"store exploded");
}

#[tokio::test]
async fn health_reports_in_memory_store() {
    let app = app();
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "in_memory");
}
