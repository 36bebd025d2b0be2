//! Integration tests for the mixdesk-ui API endpoints
//!
//! Routes are exercised through `tower::util::ServiceExt::oneshot` against
//! a freshly initialized temp database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use mixdesk_common::db::models::{ChannelParamsUpdate, InputBindingUpdate};
use mixdesk_common::db::{
    channels, configurations, devices, frequencies, init_database, inputs, interfaces, sources,
    types, users,
};
use mixdesk_ui::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower::util::ServiceExt; // for `oneshot` method

struct TestDb {
    pool: SqlitePool,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn setup_test_db(name: &str) -> TestDb {
    let path = PathBuf::from(format!(
        "/tmp/mixdesk-ui-test-{}-{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let pool = init_database(&path).await.expect("database should initialize");
    TestDb { pool, path }
}

struct Fixture {
    user_id: i64,
    interface_id: i64,
    channel_id: i64,
    input_id: i64,
    device_id: i64,
    configuration_id: i64,
}

async fn seed(pool: &SqlitePool) -> Fixture {
    let user_id = users::create(pool, "operator@studio.example", "argon2-hash")
        .await
        .unwrap();

    let freq = frequencies::get_by_value(pool, 44.1).await.unwrap();
    let interface_id = interfaces::insert(
        pool,
        "um2",
        "UM2",
        "Behringer U-Phoria UM2",
        Some(59.0),
        Some(freq.id),
    )
    .await
    .unwrap();

    let type_id = types::insert(pool, "Vocals", None).await.unwrap();
    let source_id = sources::insert(pool).await.unwrap();
    sources::set_type(pool, source_id, type_id).await.unwrap();

    let channel_id = channels::insert(pool, "CH 1", Some(source_id)).await.unwrap();
    let input_id = inputs::insert(pool, "Input 1", None).await.unwrap();
    let device_id = devices::insert(pool, "SM58", None).await.unwrap();

    let configuration_id = configurations::create(
        pool,
        user_id,
        interface_id,
        &[ChannelParamsUpdate {
            channel_id,
            volume: 50.0,
            solo: false,
            mute: false,
            link: false,
        }],
        &[InputBindingUpdate {
            input_id,
            device_id,
        }],
    )
    .await
    .unwrap();

    Fixture {
        user_id,
        interface_id,
        channel_id,
        input_id,
        device_id,
        configuration_id,
    }
}

fn setup_app(pool: SqlitePool) -> axum::Router {
    build_router(AppState::new(pool))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn health_endpoint() {
    let db = setup_test_db("health").await;
    let app = setup_app(db.pool.clone());

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "mixdesk-ui");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn index_and_app_js_are_served() {
    let db = setup_test_db("static").await;
    let app = setup_app(db.pool.clone());

    let response = app
        .clone()
        .oneshot(get_request("/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript"
    );
}

#[tokio::test]
async fn list_users_returns_emails_without_hashes() {
    let db = setup_test_db("users").await;
    seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let response = app.oneshot(get_request("/api/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], "operator@studio.example");
    assert!(list[0].get("password_hash").is_none());
}

#[tokio::test]
async fn user_configuration_shape() {
    let db = setup_test_db("config").await;
    let fx = seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let uri = format!("/api/users/{}/configuration", fx.user_id);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["user"]["id"], fx.user_id);

    let cfg = &body["configuration"];
    assert_eq!(cfg["id"], fx.configuration_id);
    assert_eq!(cfg["interface"]["commercial_name"], "Behringer U-Phoria UM2");
    assert_eq!(cfg["frequency"]["value"], 44.1);

    let channels = cfg["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["label"], "CH 1");
    assert_eq!(channels[0]["source_type"], "Vocals");
    assert_eq!(channels[0]["volume"], 50.0);
    assert_eq!(channels[0]["mute"], false);

    let inputs = cfg["inputs"].as_array().unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0]["device_name"], "SM58");
}

#[tokio::test]
async fn user_without_configurations_gets_null_not_error() {
    let db = setup_test_db("no-config").await;
    let user_id = users::create(&db.pool, "new@user.example", "hash")
        .await
        .unwrap();
    let app = setup_app(db.pool.clone());

    let uri = format!("/api/users/{}/configuration", user_id);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["user"]["id"], user_id);
    assert!(body["configuration"].is_null());
}

#[tokio::test]
async fn unknown_user_is_404() {
    let db = setup_test_db("unknown-user").await;
    let app = setup_app(db.pool.clone());

    let response = app
        .oneshot(get_request("/api/users/9999/configuration"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("user 9999"));
}

#[tokio::test]
async fn save_replaces_channels_and_inputs() {
    let db = setup_test_db("save").await;
    let fx = seed(&db.pool).await;

    let second_channel = channels::insert(&db.pool, "CH 2", None).await.unwrap();
    let other_device = devices::insert(&db.pool, "Minilogue", None).await.unwrap();
    let freq_96 = frequencies::get_by_value(&db.pool, 96.0).await.unwrap();

    let app = setup_app(db.pool.clone());

    let request = json!({
        "user_id": fx.user_id,
        "interface_id": fx.interface_id,
        "frequency_id": freq_96.id,
        "channels": [
            { "channel_id": second_channel, "volume": 60.0, "mute": true }
        ],
        "inputs": [
            { "input_id": fx.input_id, "device_id": other_device }
        ]
    });

    let uri = format!("/api/configurations/{}", fx.configuration_id);
    let response = app.oneshot(put_json(&uri, &request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "saved");

    // Read back: exactly the new channel list, no residue
    let channel_states = configurations::get_channels(&db.pool, fx.configuration_id)
        .await
        .unwrap();
    assert_eq!(channel_states.len(), 1);
    assert_eq!(channel_states[0].id, second_channel);
    assert!(channel_states[0].mute);

    let bindings = configurations::get_inputs(&db.pool, fx.configuration_id)
        .await
        .unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].device_id, other_device);

    // Frequency selection was applied to the interface
    let interface = interfaces::get_by_id(&db.pool, fx.interface_id).await.unwrap();
    assert_eq!(interface.frequency_id, Some(freq_96.id));
}

#[tokio::test]
async fn save_unknown_configuration_is_404() {
    let db = setup_test_db("save-unknown").await;
    let fx = seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let request = json!({
        "user_id": fx.user_id,
        "interface_id": fx.interface_id,
        "frequency_id": null,
        "channels": [],
        "inputs": []
    });

    let response = app
        .oneshot(put_json("/api/configurations/9999", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn volume_adjustment_round_trip() {
    let db = setup_test_db("volume").await;
    let fx = seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let uri = format!(
        "/api/configurations/{}/channels/{}/volume",
        fx.configuration_id, fx.channel_id
    );
    let response = app
        .oneshot(put_json(&uri, &json!({ "volume": 75.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["volume"], 75.0);
    assert_eq!(body["mute"], false);
    assert_eq!(body["solo"], false);
    assert_eq!(body["link"], false);
}

#[tokio::test]
async fn volume_out_of_range_is_400() {
    let db = setup_test_db("volume-range").await;
    let fx = seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let uri = format!(
        "/api/configurations/{}/channels/{}/volume",
        fx.configuration_id, fx.channel_id
    );
    let response = app
        .oneshot(put_json(&uri, &json!({ "volume": 140.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn volume_for_missing_parameter_row_is_404() {
    let db = setup_test_db("volume-missing").await;
    let fx = seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let uri = format!(
        "/api/configurations/{}/channels/9999/volume",
        fx.configuration_id
    );
    let response = app
        .oneshot(put_json(&uri, &json!({ "volume": 40.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_endpoints() {
    let db = setup_test_db("catalog").await;
    seed(&db.pool).await;
    let app = setup_app(db.pool.clone());

    let response = app
        .clone()
        .oneshot(get_request("/api/frequencies"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 6);

    let response = app.oneshot(get_request("/api/devices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap()[0]["name"], "SM58");
}
