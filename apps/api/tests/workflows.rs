//! Scan and discovery workflows against a real PostgreSQL + PostGIS server.
//!
//! Ignored by default. Run with:
//! ```bash
//! DATABASE_URL=postgres://localhost/canscout_test cargo test -p canscout-api -- --ignored
//! ```
//!
//! Each test tags its rows with a fresh UUID and works in its own patch of
//! ocean so nearest-store lookups never see another test's stores.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use canscout_api::services::discovery::{discover, DiscoverRequest};
use canscout_api::services::scan::{record_scan, ScanRequest};
use canscout_api::{build_app, AppState, ErrorCode};
use canscout_core::{Location, NewLocation, NewProduct, Product};
use canscout_db::{Database, DbConfig};
use canscout_geo::{DiscoveryClient, GeoConfig};

async fn test_db() -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a PostGIS database");
    Database::new(DbConfig::new(url).max_connections(2))
        .await
        .expect("connect + migrate")
}

fn unique_barcode() -> String {
    format!("{:014}", Uuid::new_v4().as_u128() % 100_000_000_000_000)
}

async fn insert_product(db: &Database, tag: &str) -> Product {
    db.products()
        .insert(&NewProduct {
            brand: format!("Scan Brand {}", tag),
            flavor: "Original".to_string(),
            size: "16 fl oz".to_string(),
            barcode: Some(unique_barcode()),
            ..Default::default()
        })
        .await
        .unwrap()
}

fn store(tag: &str, name: &str, latitude: f64, longitude: f64) -> NewLocation {
    NewLocation {
        name: name.to_string(),
        address: format!("{} {} St", name, tag),
        city: "Testville".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        latitude,
        longitude,
    }
}

async fn insert_store(db: &Database, tag: &str, name: &str, latitude: f64, longitude: f64) -> Location {
    db.locations()
        .insert(&store(tag, name, latitude, longitude))
        .await
        .unwrap()
}

fn scan_at(barcode: &str, latitude: f64, longitude: f64) -> ScanRequest {
    ScanRequest {
        barcode: barcode.to_string(),
        latitude: Some(latitude),
        longitude: Some(longitude),
        in_stock: true,
        ..Default::default()
    }
}

// ── Scan ─────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn scan_with_unknown_barcode_is_not_found() {
    let db = test_db().await;

    let err = record_scan(&db, &scan_at(&unique_barcode(), -48.0, -28.0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(err.message.contains("barcode"));
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn scan_with_unknown_location_is_not_found() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();
    let product = insert_product(&db, &tag).await;

    let request = ScanRequest {
        barcode: product.barcode.clone().unwrap(),
        location_id: Some(Uuid::new_v4().to_string()),
        in_stock: true,
        ..Default::default()
    };
    let err = record_scan(&db, &request).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(err.message.contains("Location"));

    db.products().delete(product.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn coordinate_scan_attaches_to_nearest_store() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();
    let product = insert_product(&db, &tag).await;
    let near = insert_store(&db, &tag, "Near", -50.0, -30.0).await;
    let far = insert_store(&db, &tag, "Far", -50.0, -29.99).await;

    let mut request = scan_at(product.barcode.as_deref().unwrap(), -50.0005, -30.0);
    request.price = Some("2.99".to_string());
    let outcome = record_scan(&db, &request).await.unwrap();

    assert!(outcome.created);
    assert_eq!(outcome.location.id, near.id);
    assert_eq!(outcome.inventory.price_cents, Some(299));
    let distance = outcome.distance_m.unwrap();
    assert!(distance > 40.0 && distance < 70.0, "distance was {}", distance);
    assert!(outcome.warning.is_none());

    db.locations().delete(near.id).await.unwrap();
    db.locations().delete(far.id).await.unwrap();
    db.products().delete(product.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn distant_scan_is_recorded_with_warning() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();
    let product = insert_product(&db, &tag).await;
    let only = insert_store(&db, &tag, "Lonely", -52.0, -32.0).await;

    let outcome = record_scan(&db, &scan_at(product.barcode.as_deref().unwrap(), -52.02, -32.0))
        .await
        .unwrap();

    assert_eq!(outcome.location.id, only.id);
    assert!(outcome.distance_m.unwrap() > 1_000.0);
    assert!(outcome.warning.as_deref().is_some_and(|w| w.contains("km away")));
    assert_eq!(db.inventory().count_for(only.id, product.id).await.unwrap(), 1);

    db.locations().delete(only.id).await.unwrap();
    db.products().delete(product.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn repeated_scan_updates_instead_of_creating() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();
    let product = insert_product(&db, &tag).await;
    let shop = insert_store(&db, &tag, "Repeat", -54.0, -34.0).await;

    let request = ScanRequest {
        barcode: product.barcode.clone().unwrap(),
        location_id: Some(shop.id.to_string()),
        price_cents: Some(349),
        in_stock: true,
        ..Default::default()
    };
    let first = record_scan(&db, &request).await.unwrap();
    assert!(first.created);
    assert!(first.distance_m.is_none());

    let restock = ScanRequest {
        in_stock: false,
        price_cents: None,
        ..request
    };
    let second = record_scan(&db, &restock).await.unwrap();
    assert!(!second.created);
    assert_eq!(second.inventory.id, first.inventory.id);
    assert!(!second.inventory.in_stock);
    assert_eq!(db.inventory().count_for(shop.id, product.id).await.unwrap(), 1);

    db.locations().delete(shop.id).await.unwrap();
    db.products().delete(product.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn scan_endpoint_returns_201_then_200() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();
    let product = insert_product(&db, &tag).await;
    let shop = insert_store(&db, &tag, "Status", -56.0, -36.0).await;

    let app = build_app(
        AppState::new(db.clone(), &GeoConfig::default()).unwrap(),
        CorsLayer::permissive(),
    );
    let body = json!({
        "barcode": product.barcode,
        "location_id": shop.id.to_string(),
        "price": "3.49"
    });
    let scan = || {
        Request::builder()
            .method(Method::POST)
            .uri("/api/scan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = app.clone().oneshot(scan()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["data"]["created"], true);

    let response = app.oneshot(scan()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    db.locations().delete(shop.id).await.unwrap();
    db.products().delete(product.id).await.unwrap();
}

// ── Discovery import ─────────────────────────────────────────────────

fn fuel_node(id: i64, name: &str, tags: Value) -> Value {
    let mut all = json!({ "amenity": "fuel", "name": name });
    if let (Some(all), Some(extra)) = (all.as_object_mut(), tags.as_object()) {
        all.extend(extra.clone());
    }
    json!({ "type": "node", "id": id, "lat": -58.0, "lon": -38.0, "tags": all })
}

async fn overpass_with(elements: Vec<Value>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "elements": elements })))
        .mount(&server)
        .await;
    server
}

fn discovery_client(server: &MockServer) -> DiscoveryClient {
    DiscoveryClient::new(
        &GeoConfig::default()
            .overpass_url(format!("{}/api/interpreter", server.uri()))
            .user_agent("canscout-tests")
            .timeout(Duration::from_secs(2))
            .politeness_delay(Duration::ZERO),
    )
    .unwrap()
}

fn import_request(dedupe: bool) -> DiscoverRequest {
    DiscoverRequest {
        latitude: Some(-58.0),
        longitude: Some(-38.0),
        radius_m: Some(2_000.0),
        areas: None,
        import: true,
        dedupe,
    }
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn import_counts_incomplete_duplicate_and_new_candidates() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();
    let existing = insert_store(&db, &tag, "Dupe", -58.0, -38.0).await;

    let server = overpass_with(vec![
        fuel_node(
            1,
            "Fresh Fuel",
            json!({
                "addr:housenumber": "200", "addr:street": format!("Fresh {} St", tag),
                "addr:city": "Testville", "addr:state": "IL", "addr:postcode": "62701"
            }),
        ),
        fuel_node(2, "No Address", json!({ "addr:city": "Testville" })),
        fuel_node(
            3,
            "Dupe Again",
            json!({
                "addr:street": format!("DUPE {} ST", tag.to_uppercase()),
                "addr:city": "TESTVILLE", "addr:state": "IL", "addr:postcode": "62701"
            }),
        ),
    ])
    .await;
    let client = discovery_client(&server);

    let report = discover(&db, &client, &import_request(true)).await.unwrap();

    assert_eq!(report.found, 3);
    assert_eq!(report.imported, 1);
    assert_eq!(report.incomplete, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.locations[0].address, format!("200 Fresh {} St", tag));

    let without_dedupe = discover(&db, &client, &import_request(false)).await.unwrap();
    assert_eq!(without_dedupe.imported, 2);
    assert_eq!(without_dedupe.duplicates, 0);
    assert_eq!(without_dedupe.incomplete, 1);

    for location in report.locations.iter().chain(&without_dedupe.locations) {
        db.locations().delete(location.id).await.unwrap();
    }
    db.locations().delete(existing.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostGIS (set DATABASE_URL)"]
async fn candidate_failing_validation_is_counted_as_failed() {
    let db = test_db().await;
    let tag = Uuid::new_v4().to_string();

    let server = overpass_with(vec![fuel_node(
        4,
        "Long Postcode",
        json!({
            "addr:street": format!("Overflow {} Rd", tag),
            "addr:city": "Testville", "addr:state": "IL",
            "addr:postcode": "9".repeat(40)
        }),
    )])
    .await;

    let report = discover(&db, &discovery_client(&server), &import_request(true))
        .await
        .unwrap();

    assert_eq!(report.found, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.imported, 0);
    assert!(report.locations.is_empty());
}
