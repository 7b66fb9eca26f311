//! End-to-end router tests driving the app in-process.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;
use rlmk_core::constants::INVALID_CREDENTIALS;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let services = body["services"].as_array().unwrap();
    assert_eq!(services.len(), 7);
    assert!(services.iter().all(|svc| svc["healthy"] == true));
}

#[tokio::test]
async fn health_reports_services_not_running() {
    let app = TestApp::without_services();
    let (status, body) = app.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"][0]["state"], "created");
}

#[tokio::test]
async fn protected_routes_require_bearer_token() {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/api/rooms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.get("/api/auth/me", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_returns_role_of_first_household() {
    let app = TestApp::new();
    app.register("lou@example.com", Some("Maison")).await;

    let (status, body) = app
        .post("/api/auth/login", None, json!({"email": "lou@example.com", "password": "s3cret-pass"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let token = body["token"].as_str().unwrap();
    let (status, me) = app.get("/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["email"], "lou@example.com");
    assert!(me["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = TestApp::new();
    app.register("lou@example.com", None).await;

    let (s1, wrong_password) = app
        .post("/api/auth/login", None, json!({"email": "lou@example.com", "password": "bad"}))
        .await;
    let (s2, unknown_email) = app
        .post("/api/auth/login", None, json!({"email": "who@example.com", "password": "s3cret-pass"}))
        .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], INVALID_CREDENTIALS);

    let (status, body) = app.post("/api/auth/login", None, json!({"email": "lou@example.com"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn duplicate_registration_is_bad_request() {
    let app = TestApp::new();
    app.register("lou@example.com", None).await;
    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({"email": "lou@example.com", "password": "x", "firstName": "L", "lastName": "G"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn member_role_is_validated() {
    let app = TestApp::new();
    let (token, _, household) = app.register("admin@example.com", Some("Maison")).await;
    let household = household.unwrap();
    let (_, member_id, _) = app.register("member@example.com", None).await;

    let uri = format!("/api/foyers/{household}/members");
    let (status, _) = app.post(&uri, Some(&token), json!({"email": "member@example.com", "role": "owner"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(&uri, Some(&token), json!({"email": "member@example.com", "role": "member"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "member");

    let member_uri = format!("/api/foyers/{household}/members/{member_id}");
    let (status, _) = app.put(&member_uri, &token, json!({"role": "superuser"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = app.put(&member_uri, &token, json!({"role": "admin"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let (status, members) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let app = TestApp::new();
    let (token, user_id, _) = app.register("lou@example.com", Some("Maison")).await;

    for uri in ["/api/rooms/999", "/api/stocks/999", "/api/aliments/999", "/api/plants/999"] {
        let (status, body) = app.delete(uri, &token).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
        assert!(body["error"].as_str().unwrap().ends_with("not found"));

        let (status, _) = app.put(uri, &token, json!({"name": "x"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");
    }

    let (status, _) = app.delete(&format!("/api/foyers/999/members/{user_id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.put(&format!("/api/foyers/999/members/{user_id}"), &token, json!({"role": "admin"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/api/plants/999/history", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_path_and_body_are_bad_requests() {
    let app = TestApp::new();
    let (token, _, _) = app.register("lou@example.com", Some("Maison")).await;

    let (status, body) = app.delete("/api/rooms/abc", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.post("/api/rooms", Some(&token), json!({"name": "Salon"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "householdId is required");
}

#[tokio::test]
async fn inventory_flow_and_dashboard() {
    let app = TestApp::new();
    let (token, _, household) = app.register("lou@example.com", Some("Maison")).await;
    let household = household.unwrap();

    let (status, room) = app
        .post("/api/rooms", Some(&token), json!({"name": "Cuisine", "householdId": household}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let room_id = room["id"].as_i64().unwrap();

    let (_, stock) = app
        .post("/api/stocks", Some(&token), json!({"name": "Frigo", "roomId": room_id}))
        .await;
    let stock_id = stock["id"].as_i64().unwrap();

    for (name, quantity) in [("Lait", 1.0), ("Oeufs", 2.0), ("Pommes", 8.0)] {
        let (status, _) = app
            .post(
                "/api/aliments",
                Some(&token),
                json!({"name": name, "quantity": quantity, "stockId": stock_id}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, low) = app
        .get(&format!("/api/aliments?householdId={household}&lowStock=true"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(low.as_array().unwrap().len(), 2);

    let (status, counts) = app.get(&format!("/api/dashboard?householdId={household}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["members"], 1);
    assert_eq!(counts["rooms"], 1);
    assert_eq!(counts["stocks"], 1);
    assert_eq!(counts["foodItems"], 3);
    assert_eq!(counts["lowStockItems"], 2);

    let (status, _) = app.get("/api/dashboard", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn device_readings_feed_plant_history() {
    let app = TestApp::new();
    let (token, _, household) = app.register("lou@example.com", Some("Maison")).await;
    let household = household.unwrap();

    let (status, device) = app
        .post(
            "/api/esp32",
            Some(&token),
            json!({"name": "Capteur", "macAddress": "de:ad:be:ef:00:01", "householdId": household}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let device_id = device["id"].as_i64().unwrap();

    let (_, plant) = app
        .post(
            "/api/plants",
            Some(&token),
            json!({"name": "Ficus", "householdId": household, "deviceId": device_id}),
        )
        .await;
    let plant_id = plant["id"].as_i64().unwrap();

    // Devices post without a token.
    let (status, _) = app
        .post(
            "/api/esp32/readings",
            None,
            json!({"macAddress": "DE:AD:BE:EF:00:01", "readings": [
                {"type": "humidity", "value": 150.0},
                {"type": "temperature", "value": 19.5}
            ]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(
            "/api/esp32/readings",
            None,
            json!({"macAddress": "00:00:00:00:00:00", "readings": [{"type": "light", "value": 1.0}]}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, history) = app.get(&format!("/api/plants/{plant_id}/history"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["soilMoisture"][0]["value"], 0.0);
    assert_eq!(history["latest"]["temperature"], 19.5);
    assert_eq!(history["light"].as_array().unwrap().len(), 0);
}
