//! Client calls against a live in-process server.

mod common;

use common::TestServer;
use rlmk_client::endpoints::inventory::FoodItemQuery;
use rlmk_core::constants::INVALID_CREDENTIALS;
use rlmk_core::error::RlmkError;
use rlmk_models::api::{
    CreateFoodItemRequest, CreateRoomRequest, CreateStockRequest, IngestReadingsRequest, ReadingInput,
    RegisterDeviceRequest, RegisterRequest, RoomPatch,
};

fn register_request(email: &str, household: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        email: Some(email.into()),
        password: Some("s3cret-pass".into()),
        first_name: Some("Lou".into()),
        last_name: Some("Garnier".into()),
        household_name: household.map(Into::into),
    }
}

#[tokio::test]
async fn health_needs_no_token() {
    let server = TestServer::start().await;
    let health = server.client().health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.services.iter().all(|svc| svc.healthy));
}

#[tokio::test]
async fn register_stores_token_for_later_calls() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = client.register(&register_request("lou@example.com", Some("Maison"))).await.unwrap();
    assert!(client.has_token().await);
    assert_eq!(resp.role.as_deref(), Some("admin"));

    let me = client.me().await.unwrap();
    assert_eq!(me.user.email, "lou@example.com");
    assert_eq!(me.households.len(), 1);
}

#[tokio::test]
async fn login_failure_maps_to_auth_error() {
    let server = TestServer::start().await;
    let client = server.client();
    client.register(&register_request("lou@example.com", None)).await.unwrap();

    let err = server.client().login("lou@example.com", "wrong").await.unwrap_err();
    match err {
        RlmkError::AuthFailed(message) => assert_eq!(message, INVALID_CREDENTIALS),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unauthenticated_call_is_rejected() {
    let server = TestServer::start().await;
    let err = server.client().list_rooms(None).await.unwrap_err();
    assert!(matches!(err, RlmkError::AuthFailed(_)));
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = TestServer::start().await;
    let client = server.client();
    client.register(&register_request("lou@example.com", Some("Maison"))).await.unwrap();

    let err = client.update_room(999, &RoomPatch::default()).await.unwrap_err();
    match err {
        RlmkError::ServerError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Room not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn inventory_and_dashboard_round_trip() {
    let server = TestServer::start().await;
    let client = server.client();
    let auth = client.register(&register_request("lou@example.com", Some("Maison"))).await.unwrap();
    let household = auth.households[0].id;

    let room = client
        .create_room(&CreateRoomRequest {
            name: Some("Cuisine".into()),
            room_type: Some("kitchen".into()),
            household_id: Some(household),
        })
        .await
        .unwrap();
    let stock = client
        .create_stock(&CreateStockRequest {
            name: Some("Placard".into()),
            stock_type: None,
            room_id: room.id,
        })
        .await
        .unwrap();
    client
        .create_food_item(&CreateFoodItemRequest {
            name: Some("Riz".into()),
            quantity: Some(1.0),
            stock_id: stock.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let low = client
        .list_food_items(&FoodItemQuery {
            household_id: Some(household),
            low_stock: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(low.len(), 1);

    let counts = client.dashboard(household).await.unwrap();
    assert_eq!(counts.rooms, 1);
    assert_eq!(counts.stocks, 1);
    assert_eq!(counts.low_stock_items, 1);
}

#[tokio::test]
async fn device_ingest_without_token() {
    let server = TestServer::start().await;
    let client = server.client();
    let auth = client.register(&register_request("lou@example.com", Some("Maison"))).await.unwrap();

    client
        .register_device(&RegisterDeviceRequest {
            name: Some("Balcon".into()),
            mac_address: Some("aa-bb-cc-dd-ee-ff".into()),
            household_id: Some(auth.households[0].id),
        })
        .await
        .unwrap();

    let device_client = server.client();
    let resp = device_client
        .ingest_readings(&IngestReadingsRequest {
            mac_address: Some("AA:BB:CC:DD:EE:FF".into()),
            readings: Some(vec![ReadingInput {
                reading_type: Some("temperature".into()),
                value: Some(21.0),
            }]),
        })
        .await
        .unwrap();
    assert_eq!(resp.stored, 1);
}
