mod common;

use common::TestApp;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use user_service::dtos::UserResponse;

async fn create_user(client: &Client, app: &TestApp, body: Value) -> UserResponse {
    let response = client
        .post(app.url("/users"))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse JSON")
}

async fn get_user(client: &Client, app: &TestApp, id: &str) -> Value {
    let response = client
        .get(app.url(&format!("/users/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
async fn create_returns_entity_with_assigned_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(app.url("/users"))
        .json(&json!({ "name": "Ann", "email": "a@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let id = body["_id"].as_str().expect("Missing _id");
    assert_eq!(id.len(), 24);
    assert_eq!(
        body,
        json!({ "_id": id, "name": "Ann", "email": "a@x.com" })
    );

    let fetched = get_user(&client, &app, id).await;
    assert_eq!(fetched, body);

    app.cleanup().await;
}

#[tokio::test]
async fn create_accepts_empty_body_object() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let user = create_user(&client, &app, json!({})).await;
    assert!(!user.id.is_empty());
    assert_eq!(user.name, None);
    assert_eq!(user.email, None);

    app.cleanup().await;
}

#[tokio::test]
async fn create_stores_scalar_fields_as_strings() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let user = create_user(&client, &app, json!({ "name": 42, "email": true })).await;
    assert_eq!(user.name.as_deref(), Some("42"));
    assert_eq!(user.email.as_deref(), Some("true"));

    let fetched = get_user(&client, &app, &user.id).await;
    assert_eq!(fetched["name"], "42");
    assert_eq!(fetched["email"], "true");

    app.cleanup().await;
}

#[tokio::test]
async fn list_contains_all_created_users() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let mut created = Vec::new();
    for i in 0..3 {
        let user = create_user(
            &client,
            &app,
            json!({ "name": format!("user-{}", i), "email": format!("u{}@x.com", i) }),
        )
        .await;
        created.push(user);
    }

    let response = client
        .get(app.url("/users"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let listed: Vec<UserResponse> = response.json().await.expect("Failed to parse JSON");
    assert!(listed.len() >= created.len());
    for user in &created {
        assert!(listed.contains(user), "{:?} missing from list", user);
    }

    app.cleanup().await;
}

#[tokio::test]
async fn update_replaces_provided_fields_and_keeps_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let user = create_user(&client, &app, json!({ "name": "Ann", "email": "a@x.com" })).await;

    let response = client
        .put(app.url(&format!("/users/{}", user.id)))
        .json(&json!({ "name": "X" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let updated: UserResponse = response.json().await.expect("Failed to parse JSON");
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.name.as_deref(), Some("X"));
    assert_eq!(updated.email.as_deref(), Some("a@x.com"));

    let fetched = get_user(&client, &app, &user.id).await;
    assert_eq!(fetched["name"], "X");
    assert_eq!(fetched["_id"], user.id.as_str());

    app.cleanup().await;
}

#[tokio::test]
async fn update_with_null_removes_field() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let user = create_user(&client, &app, json!({ "name": "Ann", "email": "a@x.com" })).await;

    let response = client
        .put(app.url(&format!("/users/{}", user.id)))
        .json(&json!({ "email": null }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "_id": user.id, "name": "Ann" }));

    app.cleanup().await;
}

#[tokio::test]
async fn update_with_empty_body_returns_current_entity() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let user = create_user(&client, &app, json!({ "name": "Ann" })).await;

    let response = client
        .put(app.url(&format!("/users/{}", user.id)))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: UserResponse = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, user);

    app.cleanup().await;
}

#[tokio::test]
async fn update_of_missing_user_returns_null() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .put(app.url("/users/0123456789abcdef01234567"))
        .json(&json!({ "name": "X" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body.is_null());

    app.cleanup().await;
}

#[tokio::test]
async fn get_of_missing_user_returns_null_with_ok() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body = get_user(&client, &app, "0123456789abcdef01234567").await;
    assert!(body.is_null());

    app.cleanup().await;
}

#[tokio::test]
async fn delete_removes_user() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let user = create_user(&client, &app, json!({ "name": "Ann" })).await;

    let response = client
        .delete(app.url(&format!("/users/{}", user.id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "User deleted" }));

    let fetched = get_user(&client, &app, &user.id).await;
    assert!(fetched.is_null());

    app.cleanup().await;
}

#[tokio::test]
async fn delete_of_missing_user_still_confirms() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .delete(app.url("/users/0123456789abcdef01234567"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "User deleted" }));

    app.cleanup().await;
}
