//! End-to-end tests for the trip planning API
//!
//! Each test spawns the real axum application on an ephemeral port with both
//! upstream providers pointed at an httpmock server, then drives it with a
//! plain reqwest client.

use httpmock::prelude::*;
use serde_json::{Value, json};

use musetrip::MuseTripConfig;
use musetrip::web;

struct TestApp {
    address: String,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn(upstream: &MockServer) -> Self {
        let mut config = MuseTripConfig::default();
        config.museums.base_url = upstream.base_url();
        config.geolocation.base_url = format!("{}/geo", upstream.base_url());
        config.museums.timeout_seconds = 5;
        config.geolocation.timeout_seconds = 5;

        let app = web::app(&config).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            address,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

async fn mock_city(server: &MockServer, city: &str, records: Value) {
    let path = format!("/Museums/city/{city}");
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200).json_body(records);
        })
        .await;
}

fn paris_records() -> Value {
    json!([
        {"id": 1, "name": "Louvre", "latitude": 48.8606, "longitude": 2.3376,
         "imageUrl": "https://example.com/louvre.jpg"},
        {"id": 2, "name": "Musée d'Orsay", "latitude": 48.8600, "longitude": 2.3266}
    ])
}

#[tokio::test]
async fn show_museums_returns_flat_tagged_list() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;

    let app = TestApp::spawn(&upstream).await;
    let response = app.post("/show_museums", json!({"cities": ["Paris"]})).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let museums = body.as_array().unwrap();
    assert_eq!(museums.len(), 2);
    assert_eq!(museums[0]["name"], "Louvre");
    assert_eq!(museums[0]["city"], "Paris");
    assert_eq!(museums[0]["imageUrl"], "https://example.com/louvre.jpg");
    // id must not leak through, distance only appears on trip plans
    assert!(museums[0].get("id").is_none());
    assert!(museums[0].get("distance").is_none());
}

#[tokio::test]
async fn show_museums_with_all_cities_failing_is_400() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/Museums/city/Atlantis");
            then.status(404);
        })
        .await;

    let app = TestApp::spawn(&upstream).await;
    let response = app.post("/show_museums", json!({"cities": ["Atlantis"]})).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "No valid museums found for the provided cities. Please enter valid city names."
    );
}

#[tokio::test]
async fn show_museums_skips_failed_cities() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/Museums/city/Atlantis");
            then.status(500);
        })
        .await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post("/show_museums", json!({"cities": ["Paris", "Atlantis"]}))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn plan_trip_orders_museums_by_nearest_next() {
    let upstream = MockServer::start_async().await;
    // Far museum listed first so aggregator order differs from route order.
    mock_city(
        &upstream,
        "Paris",
        json!([
            {"id": 1, "name": "Far", "latitude": 48.9000, "longitude": 2.5000},
            {"id": 2, "name": "Start", "latitude": 48.8606, "longitude": 2.3376},
            {"id": 3, "name": "Near", "latitude": 48.8620, "longitude": 2.3400}
        ]),
    )
    .await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post(
            "/plan_trip",
            json!({"cities": ["Paris"], "start_location": "Start"}),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let plan = body["trip_plan"].as_array().unwrap();
    assert_eq!(plan.len(), 3);

    let names: Vec<&str> = plan.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Start", "Near", "Far"]);

    // First stop is the start museum itself, at zero distance.
    assert_eq!(plan[0]["distance"].as_f64().unwrap(), 0.0);
    assert!(plan.iter().all(|m| m["distance"].as_f64().unwrap() >= 0.0));
}

#[tokio::test]
async fn plan_trip_from_current_location() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/geo");
            then.status(200).json_body(json!({"loc": "48.8566,2.3522"}));
        })
        .await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post(
            "/plan_trip",
            json!({"cities": ["Paris"], "start_location": "Current Location"}),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["trip_plan"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn plan_trip_with_geolocation_down_is_400() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/geo");
            then.status(503);
        })
        .await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post(
            "/plan_trip",
            json!({"cities": ["Paris"], "start_location": "current location"}),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unable to fetch current location.");
}

#[tokio::test]
async fn plan_trip_with_out_of_range_index_is_400() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post(
            "/plan_trip",
            json!({"cities": ["Paris"], "start_location": "3"}),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid start location number. Please enter a valid number or museum name."
    );
}

#[tokio::test]
async fn plan_trip_with_unparseable_start_is_400() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post(
            "/plan_trip",
            json!({"cities": ["Paris"], "start_location": "nowhere special"}),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid start location input. Please enter a valid number or museum name."
    );
}

#[tokio::test]
async fn plan_trip_by_index_starts_at_that_museum() {
    let upstream = MockServer::start_async().await;
    mock_city(&upstream, "Paris", paris_records()).await;

    let app = TestApp::spawn(&upstream).await;
    let response = app
        .post(
            "/plan_trip",
            json!({"cities": ["Paris"], "start_location": "2"}),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let plan = body["trip_plan"].as_array().unwrap();
    assert_eq!(plan[0]["name"], "Musée d'Orsay");
    assert_eq!(plan[0]["distance"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let upstream = MockServer::start_async().await;
    let app = TestApp::spawn(&upstream).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}
