//! Full router over the SeaORM repository and an in-memory SQLite database.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use user_crud::domain::UserRepositoryInterface;
use user_crud::infrastructure::database::migrator::Migrator;
use user_crud::infrastructure::seed::seed_default_users;
use user_crud::{
    create_api_router, init_database, DatabaseConfig, SeaOrmUserRepository, SharedUserService,
    UserService,
};

async fn app() -> Router {
    let db = init_database(&DatabaseConfig::sqlite_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let repo: Arc<dyn UserRepositoryInterface> = Arc::new(SeaOrmUserRepository::new(db.clone()));
    seed_default_users(repo.as_ref()).await.unwrap();

    let service: SharedUserService = Arc::new(UserService::new(repo));
    let handle = PrometheusBuilder::new().build_recorder().handle();
    create_api_router(service, Some(db), handle)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn seeded_users_are_readable() {
    let app = app().await;

    let (status, body) = call(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "firstName": "John", "lastName": "Doe", "contactNumber": "+27 123 456 789"})
    );

    let (status, body) = call(&app, Method::GET, "/api/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Jane");
}

#[tokio::test]
async fn create_update_delete_round() {
    let app = app().await;

    let payload = json!({"firstName": "Grace", "lastName": "Hopper", "contactNumber": "+1 (202) 555-0143"});
    let (status, created) = call(&app, Method::POST, "/api/users", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 3);

    let payload = json!({"id": 3, "firstName": "Grace", "lastName": "Hopper", "contactNumber": "2025550199"});
    let (status, body) = call(&app, Method::PUT, "/api/users/3", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully updated user with ID 3");
    assert_eq!(body["data"]["contactNumber"], "2025550199");

    let (status, body) = call(&app, Method::DELETE, "/api/users/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully deleted user with ID '3'");

    let (status, body) = call(&app, Method::GET, "/api/users/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User with ID 3 not found."}));
}

#[tokio::test]
async fn duplicate_of_seeded_user_is_400() {
    let app = app().await;

    let payload = json!({"firstName": "John", "lastName": "Doe", "contactNumber": "0821234567"});
    let (status, body) = call(&app, Method::POST, "/api/users", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to create user");
    assert_eq!(
        body["error"],
        "User with the same first name and last name already exists."
    );
}

#[tokio::test]
async fn update_onto_taken_name_pair_is_400() {
    let app = app().await;

    let payload = json!({"firstName": "John", "lastName": "Doe", "contactNumber": "+98 765 432 100"});
    let (status, body) = call(&app, Method::PUT, "/api/users/2", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update user with ID '2'");
    assert_eq!(
        body["error"],
        "User with the same first name and last name already exists."
    );
}

#[tokio::test]
async fn health_pings_database() {
    let app = app().await;

    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;

    let (status, body) = call(&app, Method::GET, "/api-doc/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users/{id}"].is_object());
}
